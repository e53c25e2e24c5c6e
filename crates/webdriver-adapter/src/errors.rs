use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("webdriver connect failed: {0}")]
    Connect(String),

    #[error("invalid webdriver endpoint: {0}")]
    Endpoint(String),

    #[error("element not found: {0}")]
    NotFound(String),

    #[error("timed out after {timeout:?} waiting for {locator}")]
    WaitTimeout { locator: String, timeout: Duration },

    #[error("no <select> control at index {0}")]
    NoSuchSelect(usize),

    #[error("session already released")]
    Released,

    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
}
