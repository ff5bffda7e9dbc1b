use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Backing JSON document for the message log.
    pub store_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {raw}")))?,
            Err(_) => 3000,
        };
        let store_path = env::var("CHAT_STORE_PATH")
            .unwrap_or_else(|_| "chat.json".into())
            .into();

        Ok(Self {
            host,
            port,
            store_path,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_format() {
        let cfg = Config {
            host: "127.0.0.1".into(),
            port: 8080,
            store_path: "chat.json".into(),
        };
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    }
}
