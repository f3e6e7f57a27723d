use anyhow::Result;
use clap::Parser;

use voice_converter::cli::{convert, Cli, Commands, ServeArgs};
use voice_converter::converter::GroqClient;
use voice_converter::proxy;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let converter_config = cli.upstream.to_config();

    match cli.command {
        Some(Commands::Serve(args)) => {
            let client = GroqClient::new(converter_config)?;
            proxy::start_server(args.to_config(), client).await?;
        }
        None => {
            let args = ServeArgs::from_env()?;
            let client = GroqClient::new(converter_config)?;
            proxy::start_server(args.to_config(), client).await?;
        }
        Some(Commands::Convert(args)) => {
            convert::run(converter_config, args).await?;
        }
    }

    Ok(())
}
