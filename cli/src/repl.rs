use anyhow::Result;
use big::{karatsuba_threshold, set_karatsuba_threshold};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::eval::Evaluator;

pub struct Repl {
  evaluator: Evaluator,
  echo: bool,
}

impl Repl {
  pub fn new(echo: bool) -> Self {
    Repl { evaluator: Evaluator::new(), echo }
  }

  pub fn evaluator(&self) -> &Evaluator {
    &self.evaluator
  }

  pub fn run(&mut self) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let prompt = if self.echo { "" } else { "> " };
    loop {
      let line = match editor.readline(prompt) {
        Ok(line) => line,
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
        Err(err) => Err(err)?,
      };
      if self.echo {
        println!("> {line}");
      }
      _ = editor.add_history_entry(&line);
      if !self.exec(&line) {
        break;
      }
    }
    Ok(())
  }

  /// Handles one line of input, printing whatever it produces. Returns `false`
  /// once the session should end.
  pub fn exec(&mut self, line: &str) -> bool {
    match line.trim().strip_prefix(':') {
      Some(command) => self.command(command),
      None => {
        match self.evaluator.exec_line(line) {
          Ok(Some(value)) => println!("{value}"),
          Ok(None) => {}
          Err(err) => println!("error: {err}"),
        }
        true
      }
    }
  }

  fn command(&mut self, command: &str) -> bool {
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
      (Some("quit" | "q"), None) => return false,
      (Some("vars"), None) => {
        for (name, value) in self.evaluator.vars() {
          println!("{name} = {value}");
        }
      }
      (Some("threshold"), None) => println!("{}", karatsuba_threshold()),
      (Some("threshold"), Some(n)) if words.next().is_none() => match n.parse() {
        Ok(n) => set_karatsuba_threshold(n),
        Err(_) => println!("error: invalid threshold `{n}`"),
      },
      _ => println!("error: unknown command `:{command}`"),
    }
    true
  }
}
