use std::time::Duration;

use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};
use url::Url;

use courtbook_core_types::Locator;

use crate::config::DriverConfig;
use crate::errors::AdapterError;

/// One live browser session.
///
/// All page interaction goes through this wrapper; `quit` may be called any
/// number of times but tears the session down at most once.
pub struct Driver {
    inner: Mutex<Option<WebDriver>>,
    poll_interval: Duration,
}

impl Driver {
    /// Connect to the WebDriver endpoint and open a browser window.
    pub async fn connect(config: &DriverConfig) -> Result<Self, AdapterError> {
        Url::parse(&config.webdriver_url)
            .map_err(|err| AdapterError::Endpoint(format!("{}: {err}", config.webdriver_url)))?;

        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg(&format!(
            "--window-size={},{}",
            config.window_width, config.window_height
        ))?;
        if config.headless {
            caps.add_arg("--headless=new")?;
        }
        for arg in &config.browser_args {
            caps.add_arg(arg)?;
        }

        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .map_err(|err| AdapterError::Connect(err.to_string()))?;
        info!(endpoint = %config.webdriver_url, "webdriver session opened");

        Ok(Self {
            inner: Mutex::new(Some(driver)),
            poll_interval: config.poll_interval(),
        })
    }

    async fn handle(&self) -> Result<WebDriver, AdapterError> {
        self.inner.lock().await.clone().ok_or(AdapterError::Released)
    }

    pub async fn goto(&self, url: &str) -> Result<(), AdapterError> {
        let driver = self.handle().await?;
        driver.goto(url).await?;
        Ok(())
    }

    pub async fn click(&self, locator: &Locator) -> Result<(), AdapterError> {
        let driver = self.handle().await?;
        let elem = find_one(&driver, locator).await?;
        elem.click().await?;
        Ok(())
    }

    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), AdapterError> {
        let driver = self.handle().await?;
        let elem = find_one(&driver, locator).await?;
        elem.send_keys(text).await?;
        Ok(())
    }

    /// Poll until the element is displayed and enabled, bounded by `timeout`.
    pub async fn wait_actionable(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), AdapterError> {
        self.wait_for(locator, timeout, true).await
    }

    /// Poll until the element is displayed, bounded by `timeout`.
    pub async fn wait_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), AdapterError> {
        self.wait_for(locator, timeout, false).await
    }

    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
        require_enabled: bool,
    ) -> Result<(), AdapterError> {
        let driver = self.handle().await?;
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(elem) = driver.find(to_by(locator)).await {
                let displayed = elem.is_displayed().await.unwrap_or(false);
                let enabled = !require_enabled || elem.is_enabled().await.unwrap_or(false);
                if displayed && enabled {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(AdapterError::WaitTimeout {
                    locator: locator.to_string(),
                    timeout,
                });
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Number of elements currently matching the locator.
    pub async fn count(&self, locator: &Locator) -> Result<usize, AdapterError> {
        let driver = self.handle().await?;
        Ok(driver.find_all(to_by(locator)).await?.len())
    }

    /// Number of `<select>` controls on the current page.
    pub async fn select_count(&self) -> Result<usize, AdapterError> {
        self.count(&Locator::tag("select")).await
    }

    /// Visible option labels of the nth `<select>` on the page.
    pub async fn select_labels(&self, index: usize) -> Result<Vec<String>, AdapterError> {
        let driver = self.handle().await?;
        let elem = nth_select(&driver, index).await?;
        let select = SelectElement::new(&elem).await?;
        let mut labels = Vec::new();
        for option in select.options().await? {
            labels.push(option.text().await?);
        }
        Ok(labels)
    }

    /// Select an option of the nth `<select>` by its visible label.
    pub async fn select_by_label(&self, index: usize, label: &str) -> Result<(), AdapterError> {
        let driver = self.handle().await?;
        let elem = nth_select(&driver, index).await?;
        let select = SelectElement::new(&elem).await?;
        select.select_by_visible_text(label).await?;
        Ok(())
    }

    /// Release the browser session. Safe to call more than once.
    pub async fn quit(&self) -> Result<(), AdapterError> {
        let taken = self.inner.lock().await.take();
        match taken {
            Some(driver) => {
                driver.quit().await?;
                info!("webdriver session closed");
            }
            None => debug!("webdriver session already released"),
        }
        Ok(())
    }
}

async fn find_one(driver: &WebDriver, locator: &Locator) -> Result<WebElement, AdapterError> {
    driver
        .find(to_by(locator))
        .await
        .map_err(|_| AdapterError::NotFound(locator.to_string()))
}

async fn nth_select(driver: &WebDriver, index: usize) -> Result<WebElement, AdapterError> {
    let selects = driver.find_all(By::Tag("select")).await?;
    selects
        .into_iter()
        .nth(index)
        .ok_or(AdapterError::NoSuchSelect(index))
}

pub(crate) fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::Css(v) => By::Css(v.as_str()),
        Locator::XPath(v) => By::XPath(v.as_str()),
        Locator::Id(v) => By::Id(v.as_str()),
        Locator::LinkText(v) => By::LinkText(v.as_str()),
        Locator::Tag(v) => By::Tag(v.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug(by: By) -> String {
        format!("{by:?}")
    }

    #[test]
    fn locators_map_to_matching_by_strategies() {
        assert_eq!(debug(to_by(&Locator::css("div.grid"))), debug(By::Css("div.grid")));
        assert_eq!(debug(to_by(&Locator::xpath("//button"))), debug(By::XPath("//button")));
        assert_eq!(debug(to_by(&Locator::id("login"))), debug(By::Id("login")));
        assert_eq!(debug(to_by(&Locator::link_text("Book"))), debug(By::LinkText("Book")));
        assert_eq!(debug(to_by(&Locator::tag("select"))), debug(By::Tag("select")));
    }
}
