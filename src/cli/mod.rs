pub mod convert;

use clap::{Args, Command, FromArgMatches, Parser, Subcommand};
use std::time::Duration;

use crate::config::{ConverterConfig, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::proxy::config::{ProxyConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_PORT};

#[derive(Debug, Parser)]
#[command(name = "voice-converter", version)]
#[command(about = "Active/passive voice converter API backed by Groq", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve(ServeArgs),
    /// Convert a single sentence and print the result
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct UpstreamArgs {
    /// Bearer key for the completion API
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Chat completions endpoint
    #[arg(long, env = "GROQ_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Total timeout for one upstream request, in seconds
    #[arg(long, env = "GROQ_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Listen on 127.0.0.1 only
    #[arg(long, env = "LOCAL_ONLY")]
    pub local_only: bool,

    /// Browser origin allowed by CORS (repeatable)
    #[arg(
        long = "allowed-origin",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// active_to_passive or passive_to_active
    #[arg(short, long, default_value = "active_to_passive")]
    pub direction: String,

    /// Sentence to rewrite
    pub text: String,
}

impl UpstreamArgs {
    pub fn to_config(&self) -> ConverterConfig {
        ConverterConfig {
            api_key: self.api_key.clone(),
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl ServeArgs {
    /// Server settings when no subcommand is given: environment, then defaults.
    pub fn from_env() -> Result<Self, clap::Error> {
        let matches = Self::augment_args(Command::new("serve")).try_get_matches_from(["serve"])?;
        Self::from_arg_matches(&matches)
    }

    pub fn to_config(&self) -> ProxyConfig {
        ProxyConfig {
            port: self.port,
            allow_lan_access: !self.local_only,
            allowed_origins: self
                .allowed_origins
                .iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}
