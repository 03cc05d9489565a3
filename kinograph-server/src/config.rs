use serde::Deserialize;

/// Runtime configuration, loaded from an optional `kinograph.toml` next to
/// the binary plus `KINOGRAPH_`-prefixed environment variables
/// (e.g. `KINOGRAPH_SERVER__PORT=8081`). CLI flags override both.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let raw = config::Config::builder()
            .add_source(config::File::with_name("kinograph").required(false))
            .add_source(
                config::Environment::with_prefix("KINOGRAPH").separator("__"),
            )
            .build()?;

        Ok(raw.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_any_source() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.is_none());
    }
}
