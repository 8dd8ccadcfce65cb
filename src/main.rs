//! wellness-chat - Multilingual wellness support chat
//!
#![doc = "wellness-chat - Multilingual wellness support chat"]
#![doc = "Main entry point for the wellness-chat terminal host."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wellness_chat::cli::{Cli, Commands};
use wellness_chat::commands;
use wellness_chat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let mut config = Config::load(config_path)?;

    // Provider override applies before validation
    if let Commands::Chat {
        provider: Some(p), ..
    }
    | Commands::Ask {
        provider: Some(p), ..
    } = &cli.command
    {
        tracing::debug!("Using provider override: {}", p);
        config.provider.provider_type = p.clone();
    }

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { language, .. } => {
            if let Some(l) = &language {
                tracing::debug!("Using language override: {}", l);
            }
            commands::chat::run_chat(config, language).await?;
            Ok(())
        }
        Commands::Ask {
            message, language, ..
        } => {
            tracing::info!("Sending one-shot message");
            commands::ask::run_ask(config, message, language).await?;
            Ok(())
        }
        Commands::Languages => {
            commands::languages::list_languages(&config)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "wellness_chat=debug"
    } else {
        "wellness_chat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
