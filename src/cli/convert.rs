use anyhow::Result;

use super::ConvertArgs;
use crate::config::ConverterConfig;
use crate::converter::{self, ConversionRequest, GroqClient};

/// One-shot conversion from the terminal; prints the rewritten sentence.
pub async fn run(config: ConverterConfig, args: ConvertArgs) -> Result<()> {
    let request = ConversionRequest::new(args.text, &args.direction)?;
    let client = GroqClient::new(config)?;

    tracing::info!("Converting ({})", request.direction);
    let response = converter::convert(&client, &request).await?;

    println!("{}", response.converted_text);
    Ok(())
}
