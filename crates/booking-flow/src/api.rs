use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::model::{BookingTarget, Credentials, ExecCtx, RunReport, SitePlan};
use crate::policy::FlowPolicy;
use crate::ports::{Clock, SessionPort, SystemClock};
use crate::runner::{execute, RuntimeDeps};

pub struct BookingFlowBuilder {
    policy: FlowPolicy,
    plan: SitePlan,
    session: Arc<dyn SessionPort>,
    clock: Option<Arc<dyn Clock>>,
}

impl BookingFlowBuilder {
    /// The session is the one mandatory collaborator, so it is taken here
    /// rather than through an optional setter.
    pub fn new(policy: FlowPolicy, plan: SitePlan, session: Arc<dyn SessionPort>) -> Self {
        Self {
            policy,
            plan,
            session,
            clock: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> BookingFlow {
        BookingFlow {
            policy: self.policy,
            plan: self.plan,
            session: self.session,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }
}

pub struct BookingFlow {
    policy: FlowPolicy,
    plan: SitePlan,
    session: Arc<dyn SessionPort>,
    clock: Arc<dyn Clock>,
}

impl BookingFlow {
    /// Drive one booking run to completion or terminal failure.
    ///
    /// The session is released here, exactly once, whatever the outcome —
    /// success, stage timeout, workflow error, or cancellation.
    pub async fn run(
        &self,
        ctx: ExecCtx,
        target: BookingTarget,
        credentials: Credentials,
    ) -> RunReport {
        let mut report = RunReport::new(ctx.run_id.clone(), Instant::now());
        let deps = RuntimeDeps {
            session: self.session.as_ref(),
            clock: self.clock.as_ref(),
            plan: &self.plan,
            policy: &self.policy,
        };
        let outcome = execute(&ctx, &target, &credentials, deps, &mut report).await;
        match &outcome {
            Ok(()) => {
                report.ok = true;
                info!(
                    run = %report.run_id,
                    court = report.court.as_deref().unwrap_or("none"),
                    day = report.target_day.unwrap_or(0),
                    "booking run complete"
                );
            }
            Err(err) => {
                report.error = Some(err.to_string());
                error!(run = %report.run_id, stage = %report.last_stage, error = %err, "booking run failed");
            }
        }
        if let Err(err) = self.session.release().await {
            warn!(run = %report.run_id, error = %err, "session release failed");
        }
        report.finish(Instant::now())
    }
}
