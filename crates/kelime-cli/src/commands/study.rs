//! The `kelime study` command — the interactive flashcard loop.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use kelime_core::model::WordEntry;
use kelime_core::session::{NextCard, Session};

use crate::commands::{open_session, warn_degraded, Overrides};

pub async fn execute(overrides: &Overrides) -> Result<()> {
    let (_config, mut session) = open_session(overrides).await?;

    if session.state().all_words_learned {
        print_completed(&session);
        return Ok(());
    }

    println!("kelime: Enter reveals the translation, y = learned, n = next, q = quit.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut card = match session.current_card().cloned() {
        Some(word) => word,
        None => match advance(&mut session)? {
            Some(word) => word,
            None => {
                print_completed(&session);
                return Ok(());
            }
        },
    };

    loop {
        let p = session.progress();
        println!(
            "[group {}/{} · {}/{} learned] {} ({} {})",
            p.active_group, p.group_count, p.learned_in_group, p.group_len,
            card.english, card.class, card.level
        );

        print!("  reveal> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        if line?.trim() == "q" {
            break;
        }

        println!("  {} = {}", card.english, card.turkish);
        print!("  learned? [y/n/q]> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        match line?.trim() {
            "q" => break,
            "y" => {
                // The persist attempt resolves here, before the next card
                // can be computed.
                match session.learn(&card.english).await {
                    Ok(()) => {}
                    Err(e) if e.is_degraded_only() => warn_degraded(&e),
                    Err(e) => return Err(e.into()),
                }
            }
            _ => {}
        }

        match advance(&mut session)? {
            Some(next) => card = next,
            None => {
                print_completed(&session);
                return Ok(());
            }
        }
        println!();
    }

    println!("Bye.");
    Ok(())
}

/// Apply `next_card`, announcing group promotions. Returns `None` on
/// completion.
fn advance(session: &mut Session) -> Result<Option<WordEntry>> {
    match session.next_card()? {
        NextCard::Word(word) => Ok(Some(word)),
        NextCard::GroupAdvanced { group } => {
            // A promotion resets the index to the top of the new group;
            // that card is shown next.
            println!("\nGroup complete! Moving to group {group}.");
            Ok(session.current_card().cloned())
        }
        NextCard::Completed => Ok(None),
        NextCard::Stalled => {
            // Keep the current card; the next mark recomputes the group
            // state.
            Ok(session.current_card().cloned())
        }
    }
}

fn print_completed(session: &Session) {
    let p = session.progress();
    println!("Tebrikler! All {} words learned.", p.total_words);
}
