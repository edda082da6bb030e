use clap::Parser;
use keystash::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so `get --show` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KEYSTASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { force } => commands::init::execute(&cli, force),
        Commands::Get { ref name, show } => commands::get::execute(&cli, name, show),
        Commands::Add {
            ref name,
            ref value,
            ref login,
        } => commands::add::execute(&cli, name, value.as_deref(), login.as_deref()),
        Commands::Edit {
            ref name,
            ref value,
            ref login,
        } => commands::edit::execute(&cli, name, value.as_deref(), login.as_deref()),
        Commands::Delete { ref name, force } => commands::delete::execute(&cli, name, force),
        Commands::List => commands::list::execute(&cli),
        Commands::Completions { shell } => {
            commands::completions::execute(shell, &mut std::io::stdout())
        }
    };

    if let Err(e) = result {
        keystash::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
