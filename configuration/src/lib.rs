use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SERVER_ADDRESS: &str = "8.8.8.8:53";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

const ENV_PREFIX: &str = "LOOKUP";

/// Defaults, then the TOML file at `config_path` if it exists, then
/// `LOOKUP_*` environment variables (`LOOKUP_DNS__TIMEOUT_MS=1000`).
pub fn get_config(config_path: &Path) -> Result<ClientConfiguration, ConfigError> {
    let f = File::from(config_path).format(FileFormat::Toml).required(false);
    let env = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__");
    let config = defaults()?.add_source(f).add_source(env).build()?;
    config.try_deserialize::<ClientConfiguration>()
}

/// Defaults overlaid with a TOML document.
pub fn from_toml_str(toml: &str) -> Result<ClientConfiguration, ConfigError> {
    let config = defaults()?
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;
    config.try_deserialize::<ClientConfiguration>()
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("dns.server_address", DEFAULT_SERVER_ADDRESS)?
        .set_default("dns.timeout_ms", DEFAULT_TIMEOUT_MS)
}

#[derive(Debug, Deserialize)]
pub struct ClientConfiguration {
    pub dns: DnsConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct DnsConfiguration {
    pub server_address: SocketAddr,
    timeout_ms: u64,
}

impl DnsConfiguration {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_document() {
        let c = from_toml_str("").unwrap();
        assert_eq!(DEFAULT_SERVER_ADDRESS.parse::<SocketAddr>().unwrap(), c.dns.server_address);
        assert_eq!(Duration::from_secs(5), c.dns.timeout());
    }

    #[test]
    fn document_overrides_defaults() {
        let toml = r#"
            [dns]
            server_address = "1.1.1.1:5353"
            timeout_ms = 250
        "#;
        let c = from_toml_str(toml).unwrap();
        assert_eq!("1.1.1.1:5353".parse::<SocketAddr>().unwrap(), c.dns.server_address);
        assert_eq!(Duration::from_millis(250), c.dns.timeout());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let c = from_toml_str("[dns]\ntimeout_ms = 10\n").unwrap();
        assert_eq!(DEFAULT_SERVER_ADDRESS.parse::<SocketAddr>().unwrap(), c.dns.server_address);
        assert_eq!(Duration::from_millis(10), c.dns.timeout());
    }

    #[test]
    fn bad_address_is_an_error() {
        assert!(from_toml_str("[dns]\nserver_address = \"not an address\"\n").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let c = get_config(Path::new("./definitely-not-here.toml")).unwrap();
        assert_eq!(53, c.dns.server_address.port());
    }
}
