use std::io::{self, IsTerminal};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use hhash::config::{Config, Input};
use hhash::HumanHasher;
use log::{debug, info};

/// True when stdin is redirected from a non-empty regular file. Checked
/// through metadata only, so an idle pipe never blocks.
fn stdin_has_pending_data() -> bool {
    if cfg!(unix) {
        std::fs::metadata("/dev/stdin")
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false)
    } else {
        false
    }
}

fn main() -> Result<()> {
    let start = Instant::now();
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the hash
    env_logger::Builder::from_default_env()
        .filter_level(config.log_level())
        .init();
    debug!("Configuration: {:?}", config);

    let options = config.hasher_options()?;
    let words = config.word_bank()?;
    let hasher = HumanHasher::from_options(&options, words)
        .map_err(|e| anyhow::anyhow!("invalid pattern {}: {}", options.pattern, e))?;

    let stdin = io::stdin();
    let hashed = match config.input(!stdin.is_terminal(), stdin_has_pending_data)? {
        Input::Stdin => {
            let hashed = hasher.hash_reader(stdin.lock())?;
            if hashed.is_empty() {
                // redirected but empty, same as no input at all
                hasher.random()?
            } else {
                hashed
            }
        }
        Input::Text(to_hash) => hasher.hash_string(&to_hash)?,
        // nothing to hash, fall back to a random uuid
        Input::Random => hasher.random()?,
    };

    info!("elapsed time {:?}", start.elapsed());
    println!("{}", hashed);
    Ok(())
}
