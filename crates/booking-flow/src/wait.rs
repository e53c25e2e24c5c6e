//! Bounded, cancellation-aware waits between stages.
//!
//! Deadline-based readiness conditions are used wherever the page offers
//! one; [`refreshed_count`] covers the two renders (slot grid, slot detail
//! panel) that repaint asynchronously with no ready signal, by waiting for
//! an element count to move off its pre-interaction baseline and settle.

use std::time::Duration;

use courtbook_core_types::{Locator, Stage};
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::errors::FlowError;
use crate::ports::{PortError, SessionPort};

fn map_wait(err: PortError, stage: Stage) -> FlowError {
    match err {
        PortError::WaitTimeout(_) => FlowError::TransitionTimeout { stage },
        other => FlowError::Session(other),
    }
}

/// Wait for the trigger element of `stage` to become actionable.
pub(crate) async fn actionable(
    session: &dyn SessionPort,
    cancel: &CancellationToken,
    stage: Stage,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), FlowError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(FlowError::Cancelled),
        res = session.wait_actionable(locator, timeout) => {
            res.map_err(|err| map_wait(err, stage))
        }
    }
}

pub(crate) async fn visible(
    session: &dyn SessionPort,
    cancel: &CancellationToken,
    stage: Stage,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), FlowError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(FlowError::Cancelled),
        res = session.wait_visible(locator, timeout) => {
            res.map_err(|err| map_wait(err, stage))
        }
    }
}

/// Sample the count of elements matching `locator` until it has moved off
/// `baseline` and settled: two consecutive samples agreeing on a non-zero
/// value different from the baseline.
///
/// A count equal to the baseline never satisfies the wait, whatever its
/// value; a page that still shows its pre-interaction state has not
/// repainted. At the deadline the current count is returned as-is and the
/// caller decides whether an unchanged or empty count is an error.
pub(crate) async fn refreshed_count(
    session: &dyn SessionPort,
    cancel: &CancellationToken,
    locator: &Locator,
    baseline: usize,
    interval: Duration,
    timeout: Duration,
) -> Result<usize, FlowError> {
    let deadline = Instant::now() + timeout;
    let mut last = None;
    loop {
        if cancel.is_cancelled() {
            return Err(FlowError::Cancelled);
        }
        let count = session.count(locator).await.map_err(FlowError::Session)?;
        if count > 0 && count != baseline && last == Some(count) {
            return Ok(count);
        }
        last = Some(count);
        if Instant::now() >= deadline {
            return Ok(count);
        }
        tokio::select! {
            _ = cancel.cancelled() => return Err(FlowError::Cancelled),
            _ = sleep(interval) => {}
        }
    }
}

/// Blind settle delay, still interruptible.
pub(crate) async fn settle(cancel: &CancellationToken, delay: Duration) -> Result<(), FlowError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(FlowError::Cancelled),
        _ = sleep(delay) => Ok(()),
    }
}
