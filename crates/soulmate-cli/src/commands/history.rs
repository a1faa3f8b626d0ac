use anyhow::Result;
use soulmate_core::AppCore;
use soulmate_core::models::Exchange;
use soulmate_core::services::{auth, history};
use std::sync::Arc;

use crate::commands::utils::{format_timestamp, preview_text};
use crate::output::{OutputFormat, json::print_json};

const PREVIEW_CHARS: usize = 60;

pub async fn run(core: Arc<AppCore>, email: &str, full: bool, format: OutputFormat) -> Result<()> {
    let user = auth::find_user_by_email(&core, email).await?;
    let sessions = history::load_history(&core, &user.id).await?;

    if format.is_json() {
        return print_json(&sessions);
    }

    if sessions.is_empty() {
        println!("No history for {}.", user.email);
        return Ok(());
    }

    for session in sessions {
        println!(
            "[{}] {}  ({})",
            session.date,
            session.theme_name,
            format_timestamp(Some(session.timestamp))
        );

        let shown = if full { session.exchanges.len() } else { 1 };
        for exchange in session.exchanges.iter().take(shown) {
            print_exchange(exchange);
        }
        if !full && session.more_count > 0 {
            println!("  ... {} more", session.more_count);
        }
        println!();
    }
    Ok(())
}

fn print_exchange(exchange: &Exchange) {
    println!(
        "  You: {}",
        preview_text(&exchange.user_message.content, PREVIEW_CHARS)
    );
    match &exchange.reply {
        Some(reply) => println!("  AI:  {}", preview_text(&reply.content, PREVIEW_CHARS)),
        None => println!("  AI:  -"),
    }
}
