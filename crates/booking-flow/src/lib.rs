//! The booking workflow: a sequenced, wait-gated interaction with the
//! leisure-centre reservation wizard.
//!
//! Browser access and the calendar are consumed through the ports in
//! [`ports`]; everything here is testable against fakes.

pub mod api;
pub mod errors;
pub mod model;
pub mod policy;
pub mod ports;
pub mod schedule;

mod courts;
mod redact;
mod runner;
mod wait;

pub use api::{BookingFlow, BookingFlowBuilder};
pub use errors::FlowError;
pub use model::{BookingTarget, Credentials, ExecCtx, RunReport, SitePlan};
pub use policy::{FlowPolicy, FlowTimeouts, SettleDelays};
pub use schedule::{next_occurrence, TargetDate};
