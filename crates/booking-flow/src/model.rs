use std::fmt;
use std::time::Instant;

use chrono::Weekday;
use courtbook_core_types::{Locator, RunId, Stage};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::redact;

/// The desired reservation. Immutable for the duration of one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingTarget {
    /// The run books the next occurrence of this weekday, never "today".
    pub weekday: Weekday,
    /// 1-based grid column of the desired time slot. Column 4 is the 11:15
    /// slot in the weekend layout; weekday layouts differ and need their
    /// own column value.
    pub slot_column: u32,
    /// Acceptable court labels, highest preference first.
    pub preferred_courts: Vec<String>,
}

impl Default for BookingTarget {
    fn default() -> Self {
        Self {
            weekday: Weekday::Sun,
            slot_column: 4,
            // Desirability ranking, deliberately not court-number order.
            preferred_courts: [
                "Court 5", "Court 6", "Court 7", "Court 8", "Court 1", "Court 2", "Court 3",
                "Court 4",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

/// Login identity supplied by the invoking caller. Never persisted.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &redact::email(&self.email))
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Every locator the workflow touches, fixed per run.
///
/// Kept as plain data rather than module constants so alternative site
/// configurations can be exercised in isolation.
#[derive(Clone, Debug)]
pub struct SitePlan {
    pub login_url: String,
    pub email_field: Locator,
    pub password_field: Locator,
    pub login_button: Locator,
    pub booking_menu: Locator,
    pub club_search: Locator,
    pub club_option: Locator,
    pub category_option: Locator,
    pub activity_option: Locator,
    pub view_timetable: Locator,
    pub date_field: Locator,
    pub date_picker: Locator,
    pub next_month: Locator,
    /// XPath template; `{day}` is replaced with the target day-of-month.
    pub day_cell_xpath: String,
    /// All rendered slot-grid cells, for render-stability polling.
    pub slot_grid: Locator,
    /// CSS template; `{column}` is replaced with the slot column.
    pub slot_cell_css: String,
    pub buy_now: Locator,
    pub continue_button: Locator,
    pub terms_checkbox: Locator,
}

impl SitePlan {
    /// The observed leisure-centre site.
    pub fn legend_valley() -> Self {
        Self {
            login_url:
                "https://antrimandnewtownabbey.legendonlineservices.co.uk/valley/account/login"
                    .to_string(),
            email_field: Locator::id("account-login-email"),
            password_field: Locator::id("account-login-password"),
            login_button: Locator::xpath("//button[span[text()='Login']]"),
            booking_menu: Locator::xpath("//a[contains(text(), 'Make A Booking')]"),
            club_search: Locator::css("input[type='search']"),
            club_option: Locator::xpath(
                "//ul[@class='select2-results__options select2-results__options--nested']\
                 /li[text()='Valley']",
            ),
            category_option: Locator::id("booking-behaviour-option19"),
            activity_option: Locator::id("booking-activity-option152"),
            view_timetable: Locator::xpath("//button[span[text()='View Timetable']]"),
            date_field: Locator::id("unique-identifier-2"),
            date_picker: Locator::css("div.Zebra_DatePicker"),
            next_month: Locator::css("div.Zebra_DatePicker td.dp_next"),
            day_cell_xpath: "//div[@class='Zebra_DatePicker']\
                             /table[@class='dp_daypicker dp_body']//td[text()={day}]"
                .to_string(),
            slot_grid: Locator::css("div.row div.row div.col-xl-4"),
            slot_cell_css: "div.row div.row div.col-xl-4:nth-child({column})".to_string(),
            buy_now: Locator::xpath("//button[text()='Buy now']"),
            continue_button: Locator::id("universal-basket-continue-button"),
            terms_checkbox: Locator::id("terms-and-conditions-checkbox"),
        }
    }

    pub fn day_cell(&self, day: u32) -> Locator {
        Locator::xpath(self.day_cell_xpath.replace("{day}", &day.to_string()))
    }

    pub fn slot_cell(&self, column: u32) -> Locator {
        Locator::css(self.slot_cell_css.replace("{column}", &column.to_string()))
    }
}

/// Per-run execution context.
#[derive(Clone, Debug)]
pub struct ExecCtx {
    pub run_id: RunId,
    pub cancel: CancellationToken,
}

impl ExecCtx {
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            cancel: CancellationToken::new(),
        }
    }
}

impl Default for ExecCtx {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one booking run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub run_id: RunId,
    pub ok: bool,
    pub started_at: Instant,
    pub finished_at: Instant,
    pub latency_ms: u128,
    /// Furthest stage the run entered.
    pub last_stage: Stage,
    pub court: Option<String>,
    pub target_day: Option<u32>,
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(run_id: RunId, started_at: Instant) -> Self {
        Self {
            run_id,
            ok: false,
            started_at,
            finished_at: started_at,
            latency_ms: 0,
            last_stage: Stage::Start,
            court: None,
            target_day: None,
            error: None,
        }
    }

    pub fn finish(mut self, finished_at: Instant) -> Self {
        self.finished_at = finished_at;
        self.latency_ms = finished_at
            .saturating_duration_since(self.started_at)
            .as_millis();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_prefers_courts_in_desirability_order() {
        let target = BookingTarget::default();
        assert_eq!(target.weekday, Weekday::Sun);
        assert_eq!(target.preferred_courts.first().map(String::as_str), Some("Court 5"));
        assert_eq!(target.preferred_courts.last().map(String::as_str), Some("Court 4"));
        assert_eq!(target.preferred_courts.len(), 8);
    }

    #[test]
    fn day_cell_substitutes_target_day() {
        let plan = SitePlan::legend_valley();
        let cell = plan.day_cell(24);
        assert_eq!(
            cell.to_string(),
            format!("xpath={}", plan.day_cell_xpath.replace("{day}", "24"))
        );
    }

    #[test]
    fn slot_cell_substitutes_column() {
        let plan = SitePlan::legend_valley();
        assert_eq!(
            plan.slot_cell(4).to_string(),
            "css=div.row div.row div.col-xl-4:nth-child(4)"
        );
    }

    #[test]
    fn credentials_debug_never_leaks_the_password() {
        let creds = Credentials {
            email: "player@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{creds:?}");
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("player@example.com"));
    }

    #[test]
    fn report_latency_tracks_finish_time() {
        let started = Instant::now();
        let report = RunReport::new(RunId::new(), started);
        let done = report.finish(started + std::time::Duration::from_millis(1500));
        assert_eq!(done.latency_ms, 1500);
    }
}
