//! `keystash add` — store an entry, replacing any previous value.

use crate::cli::output;
use crate::cli::{read_secret_value, Cli, StoreContext};
use crate::errors::Result;
use crate::vault::{EntryStore, Payload};

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>, login: Option<&str>) -> Result<()> {
    let ctx = StoreContext::bootstrap(cli)?;
    let store = ctx.unlock()?;

    let existed = store.contains(name);
    write_entry(&store, name, value, login)?;

    if existed {
        output::success(&format!("Entry '{name}' replaced"));
    } else {
        output::success(&format!("Entry '{name}' added"));
    }
    Ok(())
}

/// Read the value and write it as a raw or credential payload.
///
/// Shared with `edit`.
pub(crate) fn write_entry(
    store: &EntryStore,
    name: &str,
    value: Option<&str>,
    login: Option<&str>,
) -> Result<()> {
    let payload = match login {
        Some(login) => {
            let password = read_secret_value(value, &format!("Password for {login}"))?;
            Payload::credential(login, password.as_str())
        }
        None => {
            let secret = read_secret_value(value, &format!("Value for {name}"))?;
            Payload::raw(secret.as_bytes())
        }
    };

    store.put_payload(name, &payload)
}
