use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{endpoint::validate_address, error::ConfigError};

/// Encoding used on the wire to the scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Json,
    Binary,
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Transport::Json),
            "binary" => Ok(Transport::Binary),
            _ => Err(ConfigError::InvalidTransport(s.to_string())),
        }
    }
}

/// Connection settings for a scheduler client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Scheduler address in any form [`validate_address`] accepts.
    pub scheduler_url: String,
    /// Per-call timeout (default: 10 seconds).
    pub timeout_ms: u64,
    pub transport: Transport,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheduler_url: "http://localhost:8081/api".to_string(),
            timeout_ms: 10_000,
            transport: Transport::Json,
        }
    }
}

impl ClientConfig {
    pub fn with_scheduler_url(mut self, url: impl Into<String>) -> Self {
        self.scheduler_url = url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Canonical scheduler endpoint.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        Ok(validate_address(&self.scheduler_url)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.endpoint().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = ClientConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.endpoint().unwrap(), "http://localhost:8081/api");
    }

    #[test]
    fn endpoint_is_normalized() {
        let cfg = ClientConfig::default().with_scheduler_url("scheduler.local");
        assert_eq!(cfg.endpoint().unwrap(), "http://scheduler.local:8081/api");
    }

    #[test]
    fn invalid_endpoint_fails_validation() {
        let cfg = ClientConfig::default().with_scheduler_url("ftp://scheduler.local");
        assert!(matches!(cfg.validate(), Err(ConfigError::Endpoint(_))));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let cfg = ClientConfig::default().with_timeout_ms(0);
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn transport_from_str() {
        assert_eq!(" JSON ".parse::<Transport>().unwrap(), Transport::Json);
        assert_eq!("binary".parse::<Transport>().unwrap(), Transport::Binary);
        assert!("thrift".parse::<Transport>().is_err());
    }

    #[test]
    fn deserialize_fills_defaults() {
        let cfg: ClientConfig =
            serde_json::from_str(r#"{"schedulerUrl":"10.0.0.1","transport":"binary"}"#).unwrap();
        assert_eq!(cfg.timeout_ms, 10_000);
        assert_eq!(cfg.transport, Transport::Binary);
        assert_eq!(cfg.endpoint().unwrap(), "http://10.0.0.1:8081/api");
    }
}
