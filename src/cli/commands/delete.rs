//! `keystash delete` — remove an entry and its registry record.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{Cli, StoreContext};
use crate::errors::{KeyStashError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, force: bool) -> Result<()> {
    let ctx = StoreContext::bootstrap(cli)?;
    let store = ctx.unlock()?;

    if !store.contains(name) {
        return Err(KeyStashError::EntryNotFound(name.to_string()));
    }

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| KeyStashError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.delete(name)?;
    output::success(&format!("Deleted entry '{name}'"));
    Ok(())
}
