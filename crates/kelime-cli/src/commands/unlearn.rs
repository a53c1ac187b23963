//! The `kelime unlearn` command.

use anyhow::Result;

use crate::commands::{open_session, warn_degraded, Overrides};

pub async fn execute(overrides: &Overrides, word: &str) -> Result<()> {
    let (_config, mut session) = open_session(overrides).await?;

    match session.unlearn(word).await {
        Ok(()) => {}
        Err(e) if e.is_degraded_only() => warn_degraded(&e),
        Err(e) => return Err(e.into()),
    }

    println!("Unlearned '{word}'.");
    Ok(())
}
