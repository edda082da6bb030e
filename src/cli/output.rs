//! Terminal output for the `keystash` binary.
//!
//! Status lines carry a one-glyph marker so they read the same in every
//! command.  Warnings and errors go to stderr, everything else to stdout,
//! which keeps `get --show` usable in pipes.

use comfy_table::{ContentArrangement, Table};
use console::{style, StyledObject};

use crate::vault::RegistryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Done,
    Failed,
    Caution,
    Note,
    Hint,
}

impl Tone {
    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Tone::Done => style("\u{2713}").green().bold(),
            Tone::Failed => style("\u{2717}").red().bold(),
            Tone::Caution => style("!").yellow().bold(),
            Tone::Note => style("\u{2022}").cyan(),
            Tone::Hint => style("\u{21b3}").dim(),
        }
    }

    fn on_stderr(self) -> bool {
        matches!(self, Tone::Failed | Tone::Caution)
    }
}

fn emit(tone: Tone, msg: &str) {
    let body = if tone == Tone::Hint {
        style(msg).dim().to_string()
    } else {
        msg.to_string()
    };
    if tone.on_stderr() {
        eprintln!("{} {body}", tone.marker());
    } else {
        println!("{} {body}", tone.marker());
    }
}

pub fn success(msg: &str) {
    emit(Tone::Done, msg);
}

pub fn error(msg: &str) {
    emit(Tone::Failed, msg);
}

pub fn warning(msg: &str) {
    emit(Tone::Caution, msg);
}

pub fn info(msg: &str) {
    emit(Tone::Note, msg);
}

pub fn tip(msg: &str) {
    emit(Tone::Hint, msg);
}

/// `"1 entry"`, `"3 entries"`.
pub fn entry_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{n} entries")
    }
}

/// Build the `list` table, or `None` for an empty registry.
fn entries_table(records: &[RegistryRecord]) -> Option<Table> {
    if records.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Entry", "Added (UTC)"]);
    for record in records {
        table.add_row(vec![
            record.name.clone(),
            record.added_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    Some(table)
}

/// Print the registry as a table, or a hint when it is empty.
pub fn print_entries_table(records: &[RegistryRecord]) {
    match entries_table(records) {
        Some(table) => {
            println!("{table}");
            info(&format!("{} in this store", entry_count(records.len())));
        }
        None => {
            info("This store holds no entries.");
            tip("Store one with `keystash add <NAME>`.");
        }
    }
}
