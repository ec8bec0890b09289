//! CLI entry point - the composition root.
//!
//! Loads `.env`, installs logging, parses arguments and dispatches to the
//! handlers. Store-backed commands get a `CliContext` from bootstrap; `serve`
//! and `import` only need the Notion settings.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use linkshelf_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool, command: Option<&Commands>) {
    let default_level = if verbose {
        "debug"
    } else if matches!(command, Some(Commands::Serve(_) | Commands::Import(_))) {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => handlers::serve::execute(&args).await?,
        Commands::Import(args) => {
            handlers::import::execute(&args).await?;
        }
        command => {
            let config = CliConfig::resolve(cli.static_source.as_deref(), &cli.supabase)?;
            let ctx = bootstrap(&config)?;
            match command {
                Commands::List(args) => handlers::list::execute(&ctx, &args).await?,
                Commands::Categories => handlers::categories::execute(&ctx).await?,
                Commands::Stats => handlers::stats::execute(&ctx).await?,
                Commands::Add(args) => {
                    handlers::add::execute(&ctx, &args).await?;
                }
                Commands::Edit { id, field, value } => {
                    handlers::edit::execute(&ctx, &id, field, &value).await?;
                }
                Commands::TogglePopular { id } => {
                    handlers::edit::toggle_popular(&ctx, &id).await?;
                }
                Commands::Remove { id } => handlers::remove::execute(&ctx, &id).await?,
                Commands::Table(args) => handlers::table::execute(&ctx, &args).await?,
                Commands::CopyUrl { id } => {
                    handlers::copy_url::execute(&ctx, &id).await?;
                }
                Commands::Serve(_) | Commands::Import(_) => {}
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables before parsing so clap's `env` fallbacks see them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.command.as_ref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
