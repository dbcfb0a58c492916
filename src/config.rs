use anyhow::Result;
use figment::{providers::{Env, Format, Serialized, Toml}, Figment};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::domain::ConstantsTable;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub constants: ConstantsTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 10,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("SOLAR__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.constants.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_figment(base()).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.constants, ConstantsTable::default());
        assert!(cfg.server.socket_addr().is_ok());
    }

    #[test]
    fn test_toml_overrides_single_constant() {
        let toml = r#"
            [server]
            port = 9000

            [constants]
            electricity_rate_usd_per_kwh = 0.30
        "#;
        let cfg = Config::from_figment(base().merge(Toml::string(toml))).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.constants.electricity_rate_usd_per_kwh, 0.30);
        assert_eq!(cfg.constants.panel_wattage_w, 550);
    }

    #[test]
    fn test_invalid_constants_fail_load() {
        let toml = r#"
            [constants]
            plan1_signature_share = 0.9
        "#;
        let err = Config::from_figment(base().merge(Toml::string(toml))).unwrap_err();
        assert!(err.to_string().contains("plan 1 shares"));
    }
}
