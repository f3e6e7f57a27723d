pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://localhost:3000",
    "https://active-passive-converter.vercel.app",
];

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub allow_lan_access: bool,
    /// Browser origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allow_lan_access: true,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl ProxyConfig {
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.get_bind_address(), self.port)
    }
}
