pub mod config;
pub mod error;
pub mod server;

pub use config::ProxyConfig;
pub use server::{build_router, start_server, AppState};
