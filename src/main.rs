//! Trimlink - URL shortening service client CLI
//!
//! Main entry point for the Trimlink application.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trimlink::cli::{Cli, Commands, LinkCommand, ProfileCommand};
use trimlink::commands;
use trimlink::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load and validate configuration
    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path);
    let config = Config::load(&config_path)?;
    config.validate()?;

    let ctx = commands::build_context(&config)?;

    // Execute command
    match cli.command {
        Commands::Login { username, password } => {
            tracing::info!("Starting login");
            commands::auth::run_login(&ctx, username, password).await
        }
        Commands::Logout => commands::auth::run_logout(&ctx),
        Commands::Register {
            firstname,
            lastname,
            username,
            email,
            password,
        } => {
            tracing::info!("Starting registration");
            commands::auth::run_register(&ctx, firstname, lastname, username, email, password)
                .await
        }
        Commands::Links { command } => match command {
            LinkCommand::List => commands::links::run_list(&ctx).await,
            LinkCommand::Shorten { url, title } => {
                commands::links::run_shorten(&ctx, url, title).await
            }
            LinkCommand::Inspect { uuid } => {
                tracing::info!("Opening detail view for '{}'", uuid);
                commands::links::run_inspect(&ctx, uuid).await
            }
            LinkCommand::Delete { uuid, yes } => {
                commands::links::run_delete(&ctx, uuid, yes).await
            }
            LinkCommand::Qr { uuid } => commands::links::run_qr(&ctx, uuid).await,
        },
        Commands::Profile { command } => match command {
            ProfileCommand::Show => commands::profile::run_show(&ctx).await,
            ProfileCommand::Update {
                firstname,
                lastname,
                custom_domain,
                remove_custom_domain,
            } => {
                commands::profile::run_update(
                    &ctx,
                    firstname,
                    lastname,
                    custom_domain,
                    remove_custom_domain,
                )
                .await
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "trimlink=debug" } else { "trimlink=info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
