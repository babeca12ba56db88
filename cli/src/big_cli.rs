use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use log::debug;

use crate::{common::EvalOptions, eval::Evaluator, repl::Repl};

#[derive(Parser)]
#[command(name = "big", version, about = "Arbitrary-precision unsigned integer calculator")]
pub struct BigCliArgs {
  #[command(flatten)]
  pub options: EvalOptions,
  #[command(subcommand)]
  pub command: BigCliCommand,
}

pub struct BigCli {
  pub options: EvalOptions,
}

impl BigCli {
  pub fn execute(&self, command: BigCliCommand) -> Result<()> {
    self.options.apply();
    match command {
      BigCliCommand::Eval(args) => self.eval(args),
      BigCliCommand::Run(args) => self.run(args),
      BigCliCommand::Repl(args) => self.repl(args),
      BigCliCommand::Completion(CompletionArgs { shell }) => {
        generate(shell, &mut BigCliArgs::command(), "big", &mut io::stdout());
        Ok(())
      }
    }
  }

  fn eval(&self, EvalArgs { exprs }: EvalArgs) -> Result<()> {
    let mut evaluator = Evaluator::new();
    for expr in &exprs {
      if let Some(value) = evaluator.exec_line(expr).with_context(|| format!("in `{expr}`"))? {
        println!("{value}");
      }
    }
    self.options.report(&evaluator.stats);
    Ok(())
  }

  fn run(&self, RunArgs { src }: RunArgs) -> Result<()> {
    let program =
      fs::read_to_string(&src).with_context(|| format!("could not read `{}`", src.display()))?;
    debug!("running {} ({} lines)", src.display(), program.lines().count());
    let mut evaluator = Evaluator::new();
    for (i, line) in program.lines().enumerate() {
      let value = evaluator
        .exec_line(line)
        .with_context(|| format!("at {}:{}", src.display(), i + 1))?;
      if let Some(value) = value {
        println!("{value}");
      }
    }
    self.options.report(&evaluator.stats);
    Ok(())
  }

  fn repl(&self, ReplArgs { echo }: ReplArgs) -> Result<()> {
    let mut repl = Repl::new(echo);
    repl.run()?;
    self.options.report(&repl.evaluator().stats);
    Ok(())
  }
}

#[derive(Clone, Subcommand)]
pub enum BigCliCommand {
  #[command(about = "Evaluate each expression and print its value")]
  Eval(EvalArgs),
  #[command(about = "Evaluate a program, one statement per line")]
  Run(RunArgs),
  #[command(about = "Start an interactive session")]
  Repl(ReplArgs),
  #[command(about = "Print a shell completion script")]
  Completion(CompletionArgs),
}

#[derive(Clone, Args)]
pub struct EvalArgs {
  #[arg(required = true)]
  exprs: Vec<String>,
}

#[derive(Clone, Args)]
pub struct RunArgs {
  src: PathBuf,
}

#[derive(Clone, Args)]
pub struct ReplArgs {
  /// Print each input line before its output.
  #[arg(long)]
  echo: bool,
}

#[derive(Clone, Args)]
pub struct CompletionArgs {
  shell: Shell,
}
