//! Shared primitives for the courtbook crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one booking run.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Abstract reference to an element within the current page state.
///
/// The WebDriver adapter maps each variant onto the corresponding
/// `thirtyfour::By` strategy.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Locator {
    Css(String),
    XPath(String),
    Id(String),
    LinkText(String),
    Tag(String),
}

impl Locator {
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::LinkText(value.into())
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::Tag(value.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(v) => write!(f, "css={v}"),
            Locator::XPath(v) => write!(f, "xpath={v}"),
            Locator::Id(v) => write!(f, "id={v}"),
            Locator::LinkText(v) => write!(f, "link={v}"),
            Locator::Tag(v) => write!(f, "tag={v}"),
        }
    }
}

/// Position in the booking workflow state machine.
///
/// Stages are strictly ordered; a run either reaches `Done` or fails
/// terminally at whichever stage it last entered.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Start,
    Authenticating,
    Authenticated,
    BookingMenuOpened,
    ClubPicked,
    CategoryPicked,
    ActivityPicked,
    TimetableOpen,
    CalendarOpen,
    DatePicked,
    SlotGridLoaded,
    SlotPicked,
    CourtResolved,
    AddedToBasket,
    TermsAccepted,
    Checkout,
    Done,
}

impl Stage {
    /// All stages in workflow order.
    pub const ORDERED: [Stage; 17] = [
        Stage::Start,
        Stage::Authenticating,
        Stage::Authenticated,
        Stage::BookingMenuOpened,
        Stage::ClubPicked,
        Stage::CategoryPicked,
        Stage::ActivityPicked,
        Stage::TimetableOpen,
        Stage::CalendarOpen,
        Stage::DatePicked,
        Stage::SlotGridLoaded,
        Stage::SlotPicked,
        Stage::CourtResolved,
        Stage::AddedToBasket,
        Stage::TermsAccepted,
        Stage::Checkout,
        Stage::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Authenticating => "authenticating",
            Stage::Authenticated => "authenticated",
            Stage::BookingMenuOpened => "booking-menu-opened",
            Stage::ClubPicked => "club-picked",
            Stage::CategoryPicked => "category-picked",
            Stage::ActivityPicked => "activity-picked",
            Stage::TimetableOpen => "timetable-open",
            Stage::CalendarOpen => "calendar-open",
            Stage::DatePicked => "date-picked",
            Stage::SlotGridLoaded => "slot-grid-loaded",
            Stage::SlotPicked => "slot-picked",
            Stage::CourtResolved => "court-resolved",
            Stage::AddedToBasket => "added-to-basket",
            Stage::TermsAccepted => "terms-accepted",
            Stage::Checkout => "checkout",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
