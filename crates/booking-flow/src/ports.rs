use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use courtbook_core_types::Locator;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    /// The readiness condition was not met within the bounded wait.
    #[error("timed out waiting for {0}")]
    WaitTimeout(String),

    #[error("element not found: {0}")]
    NotFound(String),

    #[error("session failure: {0}")]
    Session(String),
}

/// One live browser session, exclusively owned by the workflow for its
/// lifetime. `release` must be idempotent; the workflow invokes it exactly
/// once per run, on every exit path.
#[async_trait]
pub trait SessionPort: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), PortError>;

    async fn click(&self, locator: &Locator) -> Result<(), PortError>;

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), PortError>;

    /// Wait until the element is visible and enabled, bounded by `timeout`.
    async fn wait_actionable(&self, locator: &Locator, timeout: Duration)
        -> Result<(), PortError>;

    /// Wait until the element is visible, bounded by `timeout`.
    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), PortError>;

    /// Number of elements currently matching the locator.
    async fn count(&self, locator: &Locator) -> Result<usize, PortError>;

    async fn select_count(&self) -> Result<usize, PortError>;

    /// Visible option labels of the nth `<select>` on the current page.
    async fn select_labels(&self, index: usize) -> Result<Vec<String>, PortError>;

    async fn select_by_label(&self, index: usize, label: &str) -> Result<(), PortError>;

    async fn release(&self) -> Result<(), PortError>;
}

/// Supplies "today" for target-day calculation. Injectable for tests.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
