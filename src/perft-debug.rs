use std::env;

use anyhow::{bail, Context, Result};
use chess_rules::{utils::perft_divide, Game};

/// Usage: `perft-debug <depth> <expected>`, counted from the initial position.
fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let depth: usize = args
        .get(1)
        .context("missing depth")?
        .parse()
        .context("depth must be a number")?;
    let expected: usize = args
        .get(2)
        .context("missing expected count")?
        .parse()
        .context("expected count must be a number")?;
    let result = perft_divide(&Game::new(), depth);
    if result.all != expected {
        bail!("Found {} moves, expected {expected}", result.all);
    }
    Ok(())
}
