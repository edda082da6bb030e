//! `keystash completions <SHELL>` writes a completion script to stdout.
//!
//!   keystash completions zsh > "${fpath[1]}/_keystash"

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell, out: &mut impl Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, &mut *out);
    out.flush()?;
    Ok(())
}
