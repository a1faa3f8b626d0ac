use anyhow::Result;
use comfy_table::{Cell, Table};
use serde_json::json;
use soulmate_core::AppCore;
use soulmate_core::services::approaches;
use std::sync::Arc;

use crate::cli::ApproachCommands;
use crate::commands::utils::{format_timestamp, preview_text};
use crate::output::{OutputFormat, json::print_json, table::print_table};

pub async fn run(core: Arc<AppCore>, command: ApproachCommands, format: OutputFormat) -> Result<()> {
    match command {
        ApproachCommands::List => list_approaches(&core, format).await,
        ApproachCommands::Add { name, description } => {
            add_approach(&core, &name, &description, format).await
        }
        ApproachCommands::Remove { id } => remove_approach(&core, &id, format).await,
    }
}

async fn list_approaches(core: &Arc<AppCore>, format: OutputFormat) -> Result<()> {
    let approaches = approaches::list_approaches(core).await?;

    if format.is_json() {
        return print_json(&approaches);
    }

    if approaches.is_empty() {
        println!("No approaches defined.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description", "Created"]);
    for approach in approaches {
        table.add_row(vec![
            Cell::new(approach.id),
            Cell::new(approach.name),
            Cell::new(preview_text(&approach.description, 40)),
            Cell::new(format_timestamp(Some(approach.created_at))),
        ]);
    }
    print_table(table)
}

async fn add_approach(
    core: &Arc<AppCore>,
    name: &str,
    description: &str,
    format: OutputFormat,
) -> Result<()> {
    let approach = approaches::create_approach(core, name, description).await?;

    if format.is_json() {
        return print_json(&approach);
    }

    println!("Approach created: {} ({})", approach.name, approach.id);
    Ok(())
}

async fn remove_approach(core: &Arc<AppCore>, id: &str, format: OutputFormat) -> Result<()> {
    approaches::delete_approach(core, id).await?;

    if format.is_json() {
        return print_json(&json!({ "deleted": true, "id": id }));
    }

    println!("Approach deleted: {id}");
    Ok(())
}
