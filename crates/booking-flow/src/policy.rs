use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Behavioural knobs for one run. Each stage timeout stays independently
/// configurable; the defaults mirror the observed site.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowPolicy {
    pub timeouts: FlowTimeouts,
    pub settle: SettleDelays,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowTimeouts {
    /// Login trigger and post-login confirmation.
    pub login_ms: u64,
    /// Default per-stage trigger wait.
    pub stage_ms: u64,
    /// Terms checkbox; the slowest control on the site.
    pub terms_ms: u64,
    /// Slot grid / detail panel render stabilization.
    pub render_ms: u64,
}

impl FlowTimeouts {
    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    pub fn stage(&self) -> Duration {
        Duration::from_millis(self.stage_ms)
    }

    pub fn terms(&self) -> Duration {
        Duration::from_millis(self.terms_ms)
    }

    pub fn render(&self) -> Duration {
        Duration::from_millis(self.render_ms)
    }
}

impl Default for FlowTimeouts {
    fn default() -> Self {
        Self {
            login_ms: 10_000,
            stage_ms: 10_000,
            terms_ms: 20_000,
            render_ms: 5_000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleDelays {
    /// Sampling interval for render-stability polling.
    pub poll_interval_ms: u64,
    /// Blind delay before releasing the session; the checkout page gives no
    /// observable readiness signal.
    pub exit_ms: u64,
}

impl SettleDelays {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            exit_ms: 10_000,
        }
    }
}
