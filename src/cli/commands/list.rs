//! `keystash list` — display all known entry names in a table.

use crate::cli::output;
use crate::cli::{Cli, StoreContext};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = StoreContext::bootstrap(cli)?;
    let store = ctx.unlock()?;

    let records = store.list()?;
    output::print_entries_table(&records);

    Ok(())
}
