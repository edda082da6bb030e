//! `keystash edit` — replace the value of an existing entry.

use crate::cli::commands::add::write_entry;
use crate::cli::output;
use crate::cli::{Cli, StoreContext};
use crate::errors::{KeyStashError, Result};

/// Execute the `edit` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>, login: Option<&str>) -> Result<()> {
    let ctx = StoreContext::bootstrap(cli)?;
    let store = ctx.unlock()?;

    if !store.contains(name) {
        output::tip(&format!("Use `keystash add {name}` to create it."));
        return Err(KeyStashError::EntryNotFound(name.to_string()));
    }

    write_entry(&store, name, value, login)?;
    output::success(&format!("Entry '{name}' updated"));
    Ok(())
}
