use anyhow::Result;
use comfy_table::{Cell, Table};
use soulmate_core::AppCore;
use soulmate_core::services::themes;
use std::sync::Arc;

use crate::cli::ThemeCommands;
use crate::commands::utils::{preview_text, short_id};
use crate::output::{OutputFormat, json::print_json, table::print_table};

pub async fn run(core: Arc<AppCore>, command: ThemeCommands, format: OutputFormat) -> Result<()> {
    match command {
        ThemeCommands::List => list_themes(&core, format).await,
        ThemeCommands::Seed => seed_themes(&core, format).await,
    }
}

async fn list_themes(core: &Arc<AppCore>, format: OutputFormat) -> Result<()> {
    let themes = themes::list_themes(core).await?;

    if format.is_json() {
        return print_json(&themes);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description"]);
    for theme in themes {
        table.add_row(vec![
            Cell::new(theme.id),
            Cell::new(theme.name),
            Cell::new(preview_text(&theme.description, 40)),
        ]);
    }
    print_table(table)
}

async fn seed_themes(core: &Arc<AppCore>, format: OutputFormat) -> Result<()> {
    let seeded = themes::seed_themes(core).await?;

    if format.is_json() {
        return print_json(&seeded);
    }

    println!("Seeded {} themes:", seeded.len());
    for theme in seeded {
        println!("  {}  {}", short_id(&theme.id), theme.name);
    }
    Ok(())
}
