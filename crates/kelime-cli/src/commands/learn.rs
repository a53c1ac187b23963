//! The `kelime learn` command.

use anyhow::Result;

use crate::commands::{open_session, warn_degraded, Overrides};

pub async fn execute(overrides: &Overrides, word: &str) -> Result<()> {
    let (_config, mut session) = open_session(overrides).await?;

    match session.learn(word).await {
        Ok(()) => {}
        Err(e) if e.is_degraded_only() => warn_degraded(&e),
        Err(e) => return Err(e.into()),
    }

    let progress = session.progress();
    println!(
        "Learned '{word}'. Group {}: {}/{} words.",
        progress.active_group, progress.learned_in_group, progress.group_len
    );
    if progress.completed {
        println!("All groups complete. Tebrikler!");
    }
    Ok(())
}
