//! Support for library configuration options

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;
use url::Url;

/// The User-Agent sent by [`HttpTransport`](crate::http::HttpTransport).
/// Feel free to override it when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(format!("wasabi-view/{}", env!("CARGO_PKG_VERSION")))));

/// Where the AJAX endpoints live when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/wasabicalendar/";
/// How often the weekly view is refreshed when nothing else is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
/// The route a page is sent to after a failed request
pub const DEFAULT_HOME_HREF: &str = "/";

/// Settings a host needs to drive a [`CalendarPage`](crate::page::CalendarPage)
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Always a valid URL, see [`ClientConfig::set_base_url`]
    base_url: String,
    pub poll_interval: Duration,
    pub home_href: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            home_href: DEFAULT_HOME_HREF.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Change the directory of the endpoints. Invalid URLs are refused, and the previous one is kept.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), url::ParseError> {
        Url::parse(base_url)?;
        self.base_url = base_url.to_string();
        Ok(())
    }

    /// Build a configuration from `WASABI_BASE_URL`, `WASABI_POLL_INTERVAL_MS` and `WASABI_HOME`.
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("WASABI_BASE_URL") {
            config.set_base_url(&base_url)?;
        }
        if let Ok(interval) = std::env::var("WASABI_POLL_INTERVAL_MS") {
            let millis: u64 = interval.trim().parse()
                .map_err(|err| format!("Invalid WASABI_POLL_INTERVAL_MS {:?}: {}", interval, err))?;
            config.poll_interval = Duration::from_millis(millis);
        }
        if let Ok(home) = std::env::var("WASABI_HOME") {
            config.home_href = home;
        }

        log::debug!("Using configuration {:?}", config);
        Ok(config)
    }
}

/// Returns the User-Agent currently configured in [`USER_AGENT`]
pub fn user_agent() -> String {
    match USER_AGENT.lock() {
        Ok(ua) => ua.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.home_href, "/");
        assert!(user_agent().starts_with("wasabi-view/"));
    }

    #[test]
    fn invalid_base_url_is_refused() {
        let mut config = ClientConfig::default();
        assert!(config.set_base_url("not a url").is_err());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);

        config.set_base_url("https://calendar.example.com/wasabicalendar/").unwrap();
        assert_eq!(config.base_url(), "https://calendar.example.com/wasabicalendar/");
    }
}
