//! `keystash get` — decrypt an entry and copy it to the clipboard or
//! print it.

use crate::cli::output;
use crate::cli::{Cli, StoreContext};
use crate::errors::{KeyStashError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str, show: bool) -> Result<()> {
    let ctx = StoreContext::bootstrap(cli)?;
    let store = ctx.unlock()?;

    let payload = store.get_payload(name)?;
    let secret = zeroize::Zeroizing::new(payload.display_secret());

    if show || !ctx.settings.clipboard {
        println!("{}", secret.as_str());
        return Ok(());
    }

    copy_to_clipboard(&secret)?;
    output::success(&format!("Copied '{name}' to clipboard"));
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| KeyStashError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| KeyStashError::ClipboardError(e.to_string()))
}
