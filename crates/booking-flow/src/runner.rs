//! The stage sequence. Linear by design: the wizard's page order is fixed,
//! a failure at any stage is terminal for the run, and nothing is retried.

use courtbook_core_types::{Locator, Stage};
use tracing::{info, instrument};

use crate::courts;
use crate::errors::FlowError;
use crate::model::{BookingTarget, Credentials, ExecCtx, RunReport, SitePlan};
use crate::policy::FlowPolicy;
use crate::ports::{Clock, SessionPort};
use crate::{redact, schedule, wait};

pub(crate) struct RuntimeDeps<'a> {
    pub session: &'a dyn SessionPort,
    pub clock: &'a dyn Clock,
    pub plan: &'a SitePlan,
    pub policy: &'a FlowPolicy,
}

#[instrument(skip_all, fields(run = %ctx.run_id))]
pub(crate) async fn execute(
    ctx: &ExecCtx,
    target: &BookingTarget,
    credentials: &Credentials,
    deps: RuntimeDeps<'_>,
    report: &mut RunReport,
) -> Result<(), FlowError> {
    let session = deps.session;
    let cancel = &ctx.cancel;
    let plan = deps.plan;
    let t = &deps.policy.timeouts;
    let settle = &deps.policy.settle;

    session.navigate(&plan.login_url).await?;
    enter(report, Stage::Authenticating);
    info!(email = %redact::email(&credentials.email), "attempting login");

    wait::actionable(session, cancel, Stage::Authenticated, &plan.login_button, t.login())
        .await?;
    session.type_text(&plan.email_field, &credentials.email).await?;
    session
        .type_text(&plan.password_field, &credentials.password)
        .await?;
    session.click(&plan.login_button).await?;

    // The login form reports nothing on failure; the booking menu is the
    // first page state only an authenticated account can reach, so its
    // absence within the login timeout is the login verdict.
    wait::actionable(session, cancel, Stage::Authenticated, &plan.booking_menu, t.login())
        .await
        .map_err(|err| match err {
            FlowError::TransitionTimeout { .. } => FlowError::LoginNotConfirmed,
            other => other,
        })?;
    enter(report, Stage::Authenticated);

    session.click(&plan.booking_menu).await?;
    enter(report, Stage::BookingMenuOpened);

    wait::actionable(session, cancel, Stage::ClubPicked, &plan.club_search, t.stage()).await?;
    session.click(&plan.club_search).await?;
    session.click(&plan.club_option).await?;
    enter(report, Stage::ClubPicked);

    wait::actionable(session, cancel, Stage::CategoryPicked, &plan.category_option, t.stage())
        .await?;
    session.click(&plan.category_option).await?;
    enter(report, Stage::CategoryPicked);

    wait::actionable(session, cancel, Stage::ActivityPicked, &plan.activity_option, t.stage())
        .await?;
    session.click(&plan.activity_option).await?;
    enter(report, Stage::ActivityPicked);

    wait::actionable(session, cancel, Stage::TimetableOpen, &plan.view_timetable, t.stage())
        .await?;
    session.click(&plan.view_timetable).await?;
    enter(report, Stage::TimetableOpen);

    let target_date = schedule::next_occurrence(deps.clock.today(), target.weekday);
    report.target_day = Some(target_date.day_of_month);
    info!(
        date = %target_date.date,
        rollover = target_date.month_rollover,
        "targeting date"
    );

    wait::actionable(session, cancel, Stage::CalendarOpen, &plan.date_field, t.stage()).await?;
    session.click(&plan.date_field).await?;
    wait::visible(session, cancel, Stage::CalendarOpen, &plan.date_picker, t.stage()).await?;
    enter(report, Stage::CalendarOpen);

    if target_date.month_rollover {
        session.click(&plan.next_month).await?;
    }
    let day_cell = plan.day_cell(target_date.day_of_month);
    if session.count(&day_cell).await? == 0 {
        return Err(FlowError::DateNotFound {
            day: target_date.day_of_month,
        });
    }
    let grid_baseline = session.count(&plan.slot_grid).await?;
    session.click(&day_cell).await?;
    enter(report, Stage::DatePicked);

    // The grid repaints asynchronously after the date click with no ready
    // signal, and the timetable may already show a grid for another date;
    // only a cell count that moved off the pre-click baseline proves the
    // repaint happened.
    let cells = wait::refreshed_count(
        session,
        cancel,
        &plan.slot_grid,
        grid_baseline,
        settle.poll_interval(),
        t.render(),
    )
    .await?;
    if cells == 0 {
        return Err(FlowError::TransitionTimeout {
            stage: Stage::SlotGridLoaded,
        });
    }
    enter(report, Stage::SlotGridLoaded);

    let selects = Locator::tag("select");
    let select_baseline = session.count(&selects).await?;
    session.click(&plan.slot_cell(target.slot_column)).await?;
    enter(report, Stage::SlotPicked);

    // The booking form carries a <select> of its own before the slot panel
    // renders, so the court selector's arrival shows as a count above the
    // pre-click baseline. An unchanged count at the deadline still falls
    // through to resolution, which reads the live panel and reports a
    // fully-booked slot.
    wait::refreshed_count(
        session,
        cancel,
        &selects,
        select_baseline,
        settle.poll_interval(),
        t.render(),
    )
    .await?;
    let court = courts::resolve(session, &target.preferred_courts).await?;
    report.court = Some(court);
    enter(report, Stage::CourtResolved);

    wait::actionable(session, cancel, Stage::AddedToBasket, &plan.buy_now, t.stage()).await?;
    session.click(&plan.buy_now).await?;
    enter(report, Stage::AddedToBasket);

    wait::actionable(session, cancel, Stage::TermsAccepted, &plan.continue_button, t.stage())
        .await?;
    session.click(&plan.continue_button).await?;
    wait::actionable(session, cancel, Stage::TermsAccepted, &plan.terms_checkbox, t.terms())
        .await?;
    session.click(&plan.terms_checkbox).await?;
    enter(report, Stage::TermsAccepted);

    // The site reuses the same continue control to leave the terms page.
    wait::actionable(session, cancel, Stage::Checkout, &plan.continue_button, t.stage()).await?;
    session.click(&plan.continue_button).await?;
    enter(report, Stage::Checkout);

    // Payment stays out of scope; give the final page a blind settle before
    // the session is released.
    wait::settle(cancel, settle.exit()).await?;
    enter(report, Stage::Done);
    Ok(())
}

fn enter(report: &mut RunReport, stage: Stage) {
    report.last_stage = stage;
    info!(stage = %stage, "stage entered");
}
