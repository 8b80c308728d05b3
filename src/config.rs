use crate::services::paginator::DEFAULT_WORDS_PER_PAGE;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_INPUT_CHARS: usize = 100_000;
pub const DEFAULT_PROCESS_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not valid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the HTTP shell around the engine.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Submissions longer than this are refused before any pattern scan.
    pub max_input_chars: usize,
    /// Wall-clock bound on a single `process` call.
    pub process_timeout: Duration,
    pub default_words_per_page: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            process_timeout: Duration::from_millis(DEFAULT_PROCESS_TIMEOUT_MS),
            default_words_per_page: DEFAULT_WORDS_PER_PAGE,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr: Option<SocketAddr> = parse_var(&lookup, "FOLIO_BIND_ADDR")?;
        let max_input_chars: Option<usize> = parse_var(&lookup, "FOLIO_MAX_INPUT_CHARS")?;
        let timeout_ms: Option<u64> = parse_var(&lookup, "FOLIO_PROCESS_TIMEOUT_MS")?;
        let words_per_page: Option<usize> = parse_var(&lookup, "FOLIO_WORDS_PER_PAGE")?;

        if words_per_page == Some(0) {
            return Err(ConfigError::Invalid {
                var: "FOLIO_WORDS_PER_PAGE",
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let defaults = ServiceConfig::default();
        Ok(ServiceConfig {
            bind_addr: bind_addr.unwrap_or(defaults.bind_addr),
            max_input_chars: max_input_chars.unwrap_or(defaults.max_input_chars),
            process_timeout: timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.process_timeout),
            default_words_per_page: words_per_page.unwrap_or(defaults.default_words_per_page),
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => Err(ConfigError::Invalid {
            var,
            reason: err.to_string(),
            value,
        }),
    }
}
