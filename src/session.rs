//! Glue between the flow's session port and the WebDriver adapter.

use std::time::Duration;

use async_trait::async_trait;
use booking_flow::ports::{PortError, SessionPort};
use courtbook_core_types::Locator;
use webdriver_adapter::{AdapterError, Driver};

pub struct FlowSession {
    driver: Driver,
}

impl FlowSession {
    pub fn new(driver: Driver) -> Self {
        Self { driver }
    }
}

fn port_err(err: AdapterError) -> PortError {
    match err {
        AdapterError::WaitTimeout { locator, .. } => PortError::WaitTimeout(locator),
        AdapterError::NotFound(locator) => PortError::NotFound(locator),
        AdapterError::NoSuchSelect(index) => PortError::NotFound(format!("select #{index}")),
        other => PortError::Session(other.to_string()),
    }
}

#[async_trait]
impl SessionPort for FlowSession {
    async fn navigate(&self, url: &str) -> Result<(), PortError> {
        self.driver.goto(url).await.map_err(port_err)
    }

    async fn click(&self, locator: &Locator) -> Result<(), PortError> {
        self.driver.click(locator).await.map_err(port_err)
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), PortError> {
        self.driver.type_text(locator, text).await.map_err(port_err)
    }

    async fn wait_actionable(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), PortError> {
        self.driver
            .wait_actionable(locator, timeout)
            .await
            .map_err(port_err)
    }

    async fn wait_visible(&self, locator: &Locator, timeout: Duration) -> Result<(), PortError> {
        self.driver
            .wait_visible(locator, timeout)
            .await
            .map_err(port_err)
    }

    async fn count(&self, locator: &Locator) -> Result<usize, PortError> {
        self.driver.count(locator).await.map_err(port_err)
    }

    async fn select_count(&self) -> Result<usize, PortError> {
        self.driver.select_count().await.map_err(port_err)
    }

    async fn select_labels(&self, index: usize) -> Result<Vec<String>, PortError> {
        self.driver.select_labels(index).await.map_err(port_err)
    }

    async fn select_by_label(&self, index: usize, label: &str) -> Result<(), PortError> {
        self.driver
            .select_by_label(index, label)
            .await
            .map_err(port_err)
    }

    async fn release(&self) -> Result<(), PortError> {
        self.driver.quit().await.map_err(port_err)
    }
}
