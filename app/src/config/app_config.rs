//! Runtime application configuration loaded from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use qr_form::{FormConfig, FormDefaults};

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration populated from environment variables (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_port: u16,
    pub bind_address: IpAddr,
    pub default_expiration_months: u32,
    pub default_size: u32,
    pub render_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            default_expiration_months: 12,
            default_size: 256,
            render_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`. Missing keys take their default;
    /// invalid values are logged and replaced by the default.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            let fallback = get_default(key).unwrap_or_default().to_string();
            let Some(value) = lookup(key).map(|v| v.trim().to_string()) else {
                return fallback;
            };
            if value.is_empty() {
                return fallback;
            }
            match validate_setting(key, &value) {
                Ok(()) => value,
                Err(e) => {
                    tracing::warn!("Invalid {key}={value:?} ({e}), using default {fallback}");
                    fallback
                }
            }
        };

        let defaults = Self::default();
        Self {
            server_port: g("SERVER_PORT").parse().unwrap_or(defaults.server_port),
            bind_address: g("BIND_ADDRESS").parse().unwrap_or(defaults.bind_address),
            default_expiration_months: g("QR_DEFAULT_EXPIRATION_MONTHS")
                .parse()
                .unwrap_or(defaults.default_expiration_months),
            default_size: g("QR_DEFAULT_SIZE").parse().unwrap_or(defaults.default_size),
            render_timeout_ms: g("QR_RENDER_TIMEOUT_MS")
                .parse()
                .unwrap_or(defaults.render_timeout_ms),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.server_port)
    }

    /// Controller settings derived from this configuration.
    pub fn form_config(&self) -> FormConfig {
        FormConfig {
            defaults: FormDefaults {
                expiration_months: self.default_expiration_months,
                size: self.default_size,
            },
            render_timeout: Duration::from_millis(self.render_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load(&[]), AppConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load(&[
            ("SERVER_PORT", "9000"),
            ("BIND_ADDRESS", "0.0.0.0"),
            ("QR_DEFAULT_EXPIRATION_MONTHS", "6"),
            ("QR_DEFAULT_SIZE", " 512 "),
            ("QR_RENDER_TIMEOUT_MS", "1500"),
        ]);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.default_expiration_months, 6);
        assert_eq!(config.default_size, 512);
        assert_eq!(config.render_timeout_ms, 1500);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = load(&[
            ("SERVER_PORT", "not-a-port"),
            ("QR_DEFAULT_SIZE", "10"),
            ("QR_DEFAULT_EXPIRATION_MONTHS", ""),
        ]);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn form_config_carries_defaults_and_timeout() {
        let form = load(&[("QR_DEFAULT_SIZE", "300")]).form_config();
        assert_eq!(form.defaults.size, 300);
        assert_eq!(form.defaults.expiration_months, 12);
        assert_eq!(form.render_timeout, Duration::from_millis(5000));
    }
}
