use anyhow::Result;
use big_cli::{BigCli, BigCliArgs};
use clap::Parser;

fn main() -> Result<()> {
  pretty_env_logger::init();
  let BigCliArgs { options, command } = BigCliArgs::parse();
  BigCli { options }.execute(command)
}
