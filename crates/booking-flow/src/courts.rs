//! Fallback-preference court selection.

use tracing::{debug, info};

use crate::errors::FlowError;
use crate::ports::SessionPort;

/// The slot detail panel renders the court choice as the page's second
/// `<select>`; the first belongs to the surrounding booking form.
const COURT_SELECT_INDEX: usize = 1;

/// Pick the first preferred court offered by the current slot panel.
///
/// A panel without a court selector means the slot is fully booked. An
/// offered set that matches no preference is an explicit failure rather
/// than a silent no-selection.
pub(crate) async fn resolve(
    session: &dyn SessionPort,
    preferred: &[String],
) -> Result<String, FlowError> {
    if session.select_count().await? < 2 {
        return Err(FlowError::NoCourtAvailable);
    }
    let available = session.select_labels(COURT_SELECT_INDEX).await?;
    for court in preferred {
        if available.iter().any(|label| label == court) {
            session.select_by_label(COURT_SELECT_INDEX, court).await?;
            info!(court = %court, "court selected");
            return Ok(court.clone());
        }
        debug!(court = %court, "court not available");
    }
    Err(FlowError::NoPreferredCourt { available })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortError;
    use async_trait::async_trait;
    use courtbook_core_types::Locator;
    use std::sync::Mutex;
    use std::time::Duration;

    struct PanelSession {
        selects: usize,
        labels: Vec<String>,
        chosen: Mutex<Vec<(usize, String)>>,
    }

    impl PanelSession {
        fn new(selects: usize, labels: &[&str]) -> Self {
            Self {
                selects,
                labels: labels.iter().map(|s| s.to_string()).collect(),
                chosen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SessionPort for PanelSession {
        async fn navigate(&self, _url: &str) -> Result<(), PortError> {
            Ok(())
        }
        async fn click(&self, _locator: &Locator) -> Result<(), PortError> {
            Ok(())
        }
        async fn type_text(&self, _locator: &Locator, _text: &str) -> Result<(), PortError> {
            Ok(())
        }
        async fn wait_actionable(
            &self,
            _locator: &Locator,
            _timeout: Duration,
        ) -> Result<(), PortError> {
            Ok(())
        }
        async fn wait_visible(
            &self,
            _locator: &Locator,
            _timeout: Duration,
        ) -> Result<(), PortError> {
            Ok(())
        }
        async fn count(&self, _locator: &Locator) -> Result<usize, PortError> {
            Ok(0)
        }
        async fn select_count(&self) -> Result<usize, PortError> {
            Ok(self.selects)
        }
        async fn select_labels(&self, _index: usize) -> Result<Vec<String>, PortError> {
            Ok(self.labels.clone())
        }
        async fn select_by_label(&self, index: usize, label: &str) -> Result<(), PortError> {
            self.chosen
                .lock()
                .unwrap()
                .push((index, label.to_string()));
            Ok(())
        }
        async fn release(&self) -> Result<(), PortError> {
            Ok(())
        }
    }

    fn prefs() -> Vec<String> {
        ["Court 5", "Court 6", "Court 7", "Court 8", "Court 1", "Court 2", "Court 3", "Court 4"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn first_preference_present_wins() {
        let session = PanelSession::new(2, &["Court 2", "Court 4"]);
        let court = resolve(&session, &prefs()).await.unwrap();
        assert_eq!(court, "Court 2");
        let chosen = session.chosen.lock().unwrap();
        assert_eq!(chosen.as_slice(), &[(1, "Court 2".to_string())]);
    }

    #[tokio::test]
    async fn selection_happens_at_most_once() {
        let session = PanelSession::new(2, &["Court 5", "Court 6", "Court 1"]);
        let court = resolve(&session, &prefs()).await.unwrap();
        assert_eq!(court, "Court 5");
        assert_eq!(session.chosen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_court_selector_means_no_courts() {
        let session = PanelSession::new(1, &[]);
        let err = resolve(&session, &prefs()).await.unwrap_err();
        assert!(matches!(err, FlowError::NoCourtAvailable));
        assert!(session.chosen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn disjoint_offer_fails_instead_of_falling_through() {
        let session = PanelSession::new(2, &["Court 9"]);
        let err = resolve(&session, &prefs()).await.unwrap_err();
        match err {
            FlowError::NoPreferredCourt { available } => {
                assert_eq!(available, vec!["Court 9".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(session.chosen.lock().unwrap().is_empty());
    }
}
