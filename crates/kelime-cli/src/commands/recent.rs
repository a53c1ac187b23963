//! The `kelime recent` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::commands::{open_session, Overrides};

pub async fn execute(overrides: &Overrides) -> Result<()> {
    let (_config, session) = open_session(overrides).await?;

    let recent = session.recently_learned();
    if recent.is_empty() {
        println!("No recently learned words.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["English", "Turkish", "Learned at"]);
    for entry in recent {
        table.add_row(vec![
            Cell::new(&entry.english),
            Cell::new(&entry.turkish),
            Cell::new(entry.learned_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
    Ok(())
}
