//! `keystash init` — set the master password for this account's store.

use crate::cli::output;
use crate::cli::{prompt_new_password, Cli, StoreContext};
use crate::errors::{KeyStashError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let ctx = StoreContext::bootstrap(cli)?;
    let gate = ctx.gate();

    // 1. Refuse to silently replace an existing verifier.
    if gate.is_initialized() && !force {
        output::tip("Use `keystash add <NAME>` to add entries to the existing store.");
        return Err(KeyStashError::AlreadyInitialized(ctx.store_dir));
    }
    let resetting = gate.is_initialized();
    if resetting {
        output::warning("Resetting the master password deletes every stored entry.");
    }

    // 2. Prompt twice; the gate checks the confirmation before writing.
    let (password, confirmation) = prompt_new_password(ctx.settings.min_password_len)?;
    if resetting {
        let (_, removed) = gate.reset_confirmed(
            password.as_bytes(),
            confirmation.as_bytes(),
            ctx.salt.as_bytes(),
        )?;
        output::info(&format!(
            "Removed {} sealed under the old password",
            output::entry_count(removed)
        ));
    } else {
        gate.initialize_confirmed(
            password.as_bytes(),
            confirmation.as_bytes(),
            ctx.salt.as_bytes(),
        )?;
    }

    output::success(&format!(
        "Store initialized at {}",
        ctx.store_dir.display()
    ));
    output::tip("Run `keystash add <NAME>` to add an entry.");
    output::tip("Run `keystash get <NAME>` to copy it to the clipboard.");

    Ok(())
}
