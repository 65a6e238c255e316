//! Parkinson's voice screening - main entry point

use clap::Parser;
use parkinsons_voice::cli::{cmd_features, cmd_predict, cmd_serve, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkinsons_voice=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, model }) => {
            cmd_serve(host.as_deref(), port, model.as_deref()).await?;
        }
        Some(Commands::Predict {
            model,
            values,
            input,
            lang,
        }) => {
            cmd_predict(model.as_deref(), values.as_deref(), input.as_deref(), &lang)?;
        }
        Some(Commands::Features) => {
            cmd_features()?;
        }
        None => {
            // Default: run the web form with env-driven configuration
            cmd_serve(None, None, None).await?;
        }
    }

    Ok(())
}
