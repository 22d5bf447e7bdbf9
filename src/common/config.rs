// Startup configuration read from the environment

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MIN_LEAD_DAYS: u32 = 2;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_000_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub site_root: PathBuf,
    pub reservations_log: PathBuf,
    pub min_lead_days: u32,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            site_root: PathBuf::from("./public"),
            // Kept outside the site root so the log is never served.
            reservations_log: PathBuf::from("./data/reservations.ndjson"),
            min_lead_days: DEFAULT_MIN_LEAD_DAYS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST").and_then(|v| v.trim().parse().ok()) {
            config.host = host;
        }

        if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            config.port = port;
        }

        if let Some(root) = lookup("SITE_ROOT").filter(|v| !v.trim().is_empty()) {
            config.site_root = PathBuf::from(root);
        }

        if let Some(log) = lookup("RESERVATIONS_LOG").filter(|v| !v.trim().is_empty()) {
            config.reservations_log = PathBuf::from(log);
        }

        if let Some(days) = lookup("MIN_LEAD_DAYS").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.min_lead_days = days;
        }

        if let Some(limit) = lookup("MAX_BODY_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|limit| *limit > 0)
        {
            config.max_body_bytes = limit;
        }

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.port, 3000);
        assert_eq!(config.min_lead_days, 2);
        assert_eq!(config.max_body_bytes, 1_000_000);
        assert_eq!(config.site_root, PathBuf::from("./public"));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8081"),
            ("HOST", "127.0.0.1"),
            ("SITE_ROOT", "/srv/site"),
            ("RESERVATIONS_LOG", "/var/lib/stay/log.ndjson"),
            ("MIN_LEAD_DAYS", "5"),
        ]));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8081");
        assert_eq!(config.site_root, PathBuf::from("/srv/site"));
        assert_eq!(config.reservations_log, PathBuf::from("/var/lib/stay/log.ndjson"));
        assert_eq!(config.min_lead_days, 5);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("MAX_BODY_BYTES", "0"),
            ("MIN_LEAD_DAYS", "-1"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.min_lead_days, DEFAULT_MIN_LEAD_DAYS);
    }
}
