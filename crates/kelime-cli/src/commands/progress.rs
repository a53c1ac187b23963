//! The `kelime progress` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::commands::{open_session, Overrides};

pub async fn execute(overrides: &Overrides) -> Result<()> {
    let (_config, session) = open_session(overrides).await?;
    let p = session.progress();

    let mut table = Table::new();
    table.set_header(vec![
        "Active group",
        "Group progress",
        "Total learned",
        "Groups",
        "Status",
    ]);
    table.add_row(vec![
        Cell::new(p.active_group),
        Cell::new(format!("{}/{}", p.learned_in_group, p.group_len)),
        Cell::new(format!("{}/{}", p.total_learned, p.total_words)),
        Cell::new(p.group_count),
        Cell::new(if p.completed { "completed" } else { "in progress" }),
    ]);

    println!("{table}");
    Ok(())
}
