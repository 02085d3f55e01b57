//! Peptide CLI binary entry point.

use clap::Parser;
use peptide::cli::{self, AuthCommands, Cli, Commands, Context};
use peptide::error::PeptideError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PEPTIDE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let parsed = Cli::parse();

    if let Err(e) = run(&parsed).await {
        eprintln!("Error: {}", cli::format_error_help(&e));
        std::process::exit(1);
    }
}

async fn run(parsed: &Cli) -> Result<(), PeptideError> {
    let ctx = Context::load(parsed)?;
    match &parsed.command {
        Commands::Auth(auth_args) => match &auth_args.command {
            AuthCommands::Login(args) => cli::auth::handle_login(&ctx, &args.email).await,
            AuthCommands::Mfa(args) => cli::auth::handle_mfa(&ctx, args).await,
            AuthCommands::Status => cli::auth::handle_status(&ctx),
            AuthCommands::Logout => cli::auth::handle_logout(&ctx).await,
        },
        Commands::Status(args) => cli::account::handle_presence(&ctx, &args.presence).await,
        Commands::Invite(args) => cli::account::handle_invite(&ctx, &args.command).await,
        Commands::Settings(args) => cli::account::handle_settings(&ctx, &args.command).await,
    }
}
