use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the WebDriver endpoint and the browser it drives.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// Extra Chrome arguments appended after the defaults.
    pub browser_args: Vec<String>,
    /// Sampling interval for actionability polling.
    pub poll_interval_ms: u64,
}

impl DriverConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: false,
            window_width: 1280,
            window_height: 1024,
            // The booking site rejects sessions that advertise automation.
            browser_args: vec!["--disable-blink-features=AutomationControlled".to_string()],
            poll_interval_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_chromedriver() {
        let cfg = DriverConfig::default();
        assert_eq!(cfg.webdriver_url, "http://localhost:9515");
        assert!(!cfg.headless);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn partial_toml_overlays_defaults() {
        let cfg: DriverConfig =
            serde_json::from_str(r#"{"headless": true, "poll_interval_ms": 100}"#).unwrap();
        assert!(cfg.headless);
        assert_eq!(cfg.poll_interval_ms, 100);
        assert_eq!(cfg.window_width, 1280);
    }
}
