use anyhow::Result;
use comfy_table::{Cell, Table};
use soulmate_core::AppCore;
use soulmate_core::services::auth;
use std::sync::Arc;

use crate::cli::UserCommands;
use crate::commands::utils::format_timestamp;
use crate::output::{OutputFormat, json::print_json, table::print_table};

pub async fn run(core: Arc<AppCore>, command: UserCommands, format: OutputFormat) -> Result<()> {
    match command {
        UserCommands::List => list_users(&core, format).await,
    }
}

async fn list_users(core: &Arc<AppCore>, format: OutputFormat) -> Result<()> {
    let users = auth::list_users(core).await?;

    if format.is_json() {
        return print_json(&users);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Email", "Messages", "Created"]);
    for user in users {
        let messages = core.storage.messages.count_by_user(&user.id)?;
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(user.email),
            Cell::new(messages),
            Cell::new(format_timestamp(Some(user.created_at))),
        ]);
    }
    print_table(table)
}
