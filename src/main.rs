//! courtbook: books a badminton court on the leisure-centre site by driving
//! a browser through its reservation wizard.

mod config;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use booking_flow::ports::SessionPort;
use booking_flow::{next_occurrence, BookingFlowBuilder, BookingTarget, Credentials, ExecCtx, SitePlan};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use webdriver_adapter::Driver;

use crate::config::AppConfig;
use crate::session::FlowSession;

#[derive(Debug, Parser)]
#[command(name = "courtbook", about = "Automated badminton court reservation")]
struct Cli {
    /// Account email for the booking site.
    #[arg(long, env = "COURTBOOK_EMAIL")]
    email: String,

    /// Account password for the booking site.
    #[arg(long, env = "COURTBOOK_PASSWORD", hide_env_values = true)]
    password: String,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the WebDriver endpoint from the config.
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Run the browser headless.
    #[arg(long)]
    headless: bool,

    /// Print the target date computed for this fake "today" and exit
    /// without opening a browser.
    #[arg(long, value_name = "YYYY-MM-DD")]
    dry_date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut app = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(url) = &cli.webdriver_url {
        app.driver.webdriver_url = url.clone();
    }
    if cli.headless {
        app.driver.headless = true;
    }

    let weekday = app.target.weekday()?;
    if let Some(today) = cli.dry_date {
        let target = next_occurrence(today, weekday);
        println!(
            "{} (day {}, month rollover: {})",
            target.date, target.day_of_month, target.month_rollover
        );
        return Ok(());
    }

    let target = BookingTarget {
        weekday,
        slot_column: app.target.slot_column,
        preferred_courts: app.target.preferred_courts.clone(),
    };
    let mut plan = SitePlan::legend_valley();
    if let Some(url) = &app.site.login_url {
        plan.login_url = url.clone();
    }

    let driver = Driver::connect(&app.driver)
        .await
        .context("opening webdriver session")?;
    let session: Arc<dyn SessionPort> = Arc::new(FlowSession::new(driver));

    let ctx = ExecCtx::new();
    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, winding the run down");
            cancel.cancel();
        }
    });

    let flow = BookingFlowBuilder::new(app.flow.clone(), plan, session).build();
    let credentials = Credentials {
        email: cli.email,
        password: cli.password,
    };
    let report = flow.run(ctx, target, credentials).await;
    info!(
        ok = report.ok,
        stage = %report.last_stage,
        latency_ms = report.latency_ms as u64,
        "run finished"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
