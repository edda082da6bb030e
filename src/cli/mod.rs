//! CLI module — Clap argument parser, prompts, store bootstrap, and
//! command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::account_salt;
use crate::errors::{KeyStashError, Result};
use crate::vault::{EntryStore, MasterPasswordGate};

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "KEYSTASH_PASSWORD";

/// KeyStash CLI: console password manager.
#[derive(Parser)]
#[command(
    name = "keystash",
    about = "Encrypted local secret store gated by a master password",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store root directory (default: ~/.keystash)
    #[arg(long, env = "KEYSTASH_ROOT", global = true)]
    pub root: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the master password and initialize the store
    Init {
        /// Replace an existing master password verifier
        #[arg(long)]
        force: bool,
    },

    /// Retrieve an entry (copied to the clipboard by default)
    Get {
        /// Entry name (e.g. github)
        name: String,
        /// Print to stdout instead of copying to the clipboard
        #[arg(short, long)]
        show: bool,
    },

    /// Add an entry (replaces an existing one with the same name)
    Add {
        /// Entry name
        name: String,
        /// Secret value (omit for piped input or interactive prompt)
        value: Option<String>,
        /// Store a login/password credential with this login
        #[arg(short, long)]
        login: Option<String>,
    },

    /// Replace the value of an existing entry
    Edit {
        /// Entry name
        name: String,
        /// New secret value (omit for piped input or interactive prompt)
        value: Option<String>,
        /// Store a login/password credential with this login
        #[arg(short, long)]
        login: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all entry names
    List,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Store context
// ---------------------------------------------------------------------------

/// Everything a command needs to reach the current account's store.
pub struct StoreContext {
    /// Root directory holding `keystash.toml` and per-account stores.
    pub root: PathBuf,
    /// This account's store directory.
    pub store_dir: PathBuf,
    /// Installation salt derived from the account name.
    pub salt: String,
    pub settings: Settings,
}

impl StoreContext {
    /// Resolve paths and settings, creating the directories if needed.
    pub fn bootstrap(cli: &Cli) -> Result<Self> {
        let root = resolve_root(cli)?;
        let account = account_name()?;
        let store_dir = Settings::store_dir(&root, &account);

        ensure_private_dir(&root)?;
        ensure_private_dir(&store_dir)?;

        let settings = Settings::load(&root)?;
        debug!(store_dir = %store_dir.display(), kdf = ?settings.kdf, "store context ready");

        Ok(Self {
            root,
            store_dir,
            salt: account_salt(&account),
            settings,
        })
    }

    pub fn gate(&self) -> MasterPasswordGate {
        MasterPasswordGate::new(&self.store_dir, self.settings.key_derivation())
    }

    /// Check the master password and return a keyed store.
    pub fn unlock(&self) -> Result<EntryStore> {
        let gate = self.gate();
        if !gate.is_initialized() {
            return Err(KeyStashError::NotInitialized(self.store_dir.clone()));
        }

        let password = prompt_password()?;
        let key = gate.unlock(password.as_bytes(), self.salt.as_bytes())?;
        Ok(EntryStore::with_key(&self.store_dir, key))
    }
}

fn resolve_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    dirs::home_dir()
        .map(|home| home.join(".keystash"))
        .ok_or_else(|| KeyStashError::CommandFailed("cannot determine home directory".into()))
}

/// The OS account name, used to key the store directory and the salt.
pub fn account_name() -> Result<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.is_empty())
        .ok_or_else(|| KeyStashError::CommandFailed("cannot determine the OS account name".into()))
}

/// Create `dir` (owner-only on Unix) or check that it is a directory.
pub fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(KeyStashError::CommandFailed(format!(
                "{} exists but is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }

    std::fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `KEYSTASH_PASSWORD` env var (scripts, tests)
/// 2. Interactive prompt
///
/// The password is taken as-is: no trimming, no normalization.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| KeyStashError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password and its confirmation.
///
/// Returns both entries unchanged; the gate decides whether they match.
/// With `KEYSTASH_PASSWORD` set, that value serves as both.
pub fn prompt_new_password(min_len: usize) -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    let (password, confirmation) = match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => (Zeroizing::new(pw.clone()), Zeroizing::new(pw)),
        _ => {
            let password = dialoguer::Password::new()
                .with_prompt("Choose master password")
                .interact()
                .map_err(|e| KeyStashError::CommandFailed(format!("password prompt: {e}")))?;
            let confirmation = dialoguer::Password::new()
                .with_prompt("Confirm master password")
                .interact()
                .map_err(|e| KeyStashError::CommandFailed(format!("password prompt: {e}")))?;
            (Zeroizing::new(password), Zeroizing::new(confirmation))
        }
    };

    if password.len() < min_len {
        return Err(KeyStashError::CommandFailed(format!(
            "password must be at least {min_len} characters"
        )));
    }

    Ok((password, confirmation))
}

/// Read a secret value from one of three sources:
/// the command line, piped stdin, or a hidden prompt.
///
/// An empty value is rejected whichever source it came from.
pub fn read_secret_value(value: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        return non_empty(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(|c| c == '\r' || c == '\n').to_string();
        return non_empty(Zeroizing::new(trimmed));
    }

    let v = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| KeyStashError::CommandFailed(format!("input prompt: {e}")))?;
    non_empty(Zeroizing::new(v))
}

fn non_empty(value: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if value.is_empty() {
        return Err(KeyStashError::CommandFailed(
            "secret value must not be empty".into(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn empty_secret_value_rejected() {
        assert!(matches!(
            read_secret_value(Some(""), "Value"),
            Err(KeyStashError::CommandFailed(_))
        ));
        assert_eq!(
            read_secret_value(Some("x"), "Value").unwrap().as_str(),
            "x"
        );
    }

    #[test]
    fn completions_rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["keystash", "completions", "tcsh"]).is_err());
        let cli = Cli::try_parse_from(["keystash", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions {
                shell: clap_complete::Shell::Zsh
            }
        ));
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_login() {
        let cli = Cli::try_parse_from(["keystash", "add", "github", "--login", "me"]).unwrap();
        match cli.command {
            Commands::Add { name, value, login } => {
                assert_eq!(name, "github");
                assert!(value.is_none());
                assert_eq!(login.as_deref(), Some("me"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn ensure_private_dir_creates_owner_only_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_private_dir(&dir).unwrap();
        assert!(dir.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn ensure_private_dir_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        std::fs::write(&file, b"x").unwrap();
        assert!(ensure_private_dir(&file).is_err());
    }
}
