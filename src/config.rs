//! TOML configuration overlay for the CLI.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use booking_flow::{BookingTarget, FlowPolicy};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use webdriver_adapter::DriverConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub driver: DriverConfig,
    pub flow: FlowPolicy,
    pub target: TargetConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Weekday name, e.g. "sunday".
    pub weekday: String,
    pub slot_column: u32,
    pub preferred_courts: Vec<String>,
}

impl TargetConfig {
    pub fn weekday(&self) -> anyhow::Result<Weekday> {
        self.weekday
            .parse()
            .map_err(|_| anyhow!("unrecognised weekday: {}", self.weekday))
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        let target = BookingTarget::default();
        Self {
            weekday: "sunday".to_string(),
            slot_column: target.slot_column,
            preferred_courts: target.preferred_courts,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Override for the login page URL; locators stay as shipped.
    pub login_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.target.weekday().unwrap(), Weekday::Sun);
        assert_eq!(cfg.target.slot_column, 4);
        assert_eq!(cfg.driver.webdriver_url, "http://localhost:9515");
    }

    #[test]
    fn partial_sections_overlay_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [driver]
            headless = true

            [target]
            weekday = "saturday"
            preferred_courts = ["Court 1"]

            [flow.timeouts]
            terms_ms = 30000
            "#,
        )
        .unwrap();
        assert!(cfg.driver.headless);
        assert_eq!(cfg.target.weekday().unwrap(), Weekday::Sat);
        assert_eq!(cfg.target.preferred_courts, vec!["Court 1".to_string()]);
        assert_eq!(cfg.flow.timeouts.terms_ms, 30_000);
        assert_eq!(cfg.flow.timeouts.stage_ms, 10_000);
    }

    #[test]
    fn bad_weekday_is_rejected() {
        let target = TargetConfig {
            weekday: "funday".to_string(),
            ..TargetConfig::default()
        };
        assert!(target.weekday().is_err());
    }
}
