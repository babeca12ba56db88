use big::{set_karatsuba_threshold, DEFAULT_KARATSUBA_THRESHOLD};
use clap::Args;
use log::info;

use crate::stats::Stats;

#[derive(Debug, Clone, Args)]
pub struct EvalOptions {
  /// Operand length, in base 2^32 digits, at or below which multiplication
  /// falls back to the school algorithm.
  #[arg(long, env = "BIG_KARATSUBA_THRESHOLD", global = true)]
  pub karatsuba_threshold: Option<usize>,
  /// Print evaluation statistics to stderr when done.
  #[arg(long, global = true)]
  pub stats: bool,
}

impl EvalOptions {
  pub fn apply(&self) {
    let threshold = self.karatsuba_threshold.unwrap_or(DEFAULT_KARATSUBA_THRESHOLD);
    info!("karatsuba threshold: {threshold} digits");
    set_karatsuba_threshold(threshold);
  }

  pub fn report(&self, stats: &Stats) {
    if self.stats {
      eprintln!("{stats}");
    }
  }
}
