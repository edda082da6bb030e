//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod get;
pub mod init;
pub mod list;
