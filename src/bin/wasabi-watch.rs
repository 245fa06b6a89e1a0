//! Keeps a printable copy of a calendar week up to date

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;

use wasabi_view::config::ClientConfig;
use wasabi_view::http::HttpTransport;
use wasabi_view::ids::WeekMarker;
use wasabi_view::poller::PollEvent;
use wasabi_view::reporter::Reporter;
use wasabi_view::document::element;
use wasabi_view::{CalendarPage, Client, MemoryDocument, Poller};

#[derive(Parser, Debug)]
#[command(name = "wasabi-watch", about = "Watch a week of a Wasabicalendar calendar")]
struct Args {
    /// Directory of the calendar endpoints
    #[arg(long, env = "WASABI_BASE_URL")]
    base_url: Option<String>,

    /// Id of the calendar to watch
    #[arg(long)]
    cal_id: String,

    /// First day of the week to watch (defaults to this week's Monday)
    #[arg(long)]
    week: Option<String>,

    /// Value of the `csrftoken` cookie
    #[arg(long)]
    csrf_token: Option<String>,

    /// Delay between two refreshes
    #[arg(long, env = "WASABI_POLL_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Refresh once, then exit
    #[arg(long)]
    once: bool,

    /// Where to write the printable week (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn this_monday() -> NaiveDate {
    let today = Local::now().date_naive();
    today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64)
}

fn write_output(output: &Option<PathBuf>, content: &str) -> Result<(), Box<dyn Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{}", content),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &args.base_url {
        config.set_base_url(base_url)?;
    }
    if let Some(millis) = args.interval_ms {
        config.poll_interval = Duration::from_millis(millis);
    }

    let week = args.week.clone()
        .map(WeekMarker::from)
        .unwrap_or_else(|| WeekMarker::from(this_monday()));
    let mut document = MemoryDocument::with_fields(&args.cal_id, week.as_str());
    if let Some(token) = &args.csrf_token {
        document.set_cookies(format!("csrftoken={}", token));
    }

    let client = Client::new(config.base_url(), HttpTransport::new())?;
    let page = CalendarPage::attach(client, document)
        .with_reporter(Reporter::new(element::STATUS, &config.home_href));

    if args.once {
        if let Err(err) = page.load_page().await {
            log::error!("Unable to load week {}: {}", week, err);
            return Err(err.into());
        }
        if let Some(printable) = page.print_view() {
            write_output(&args.output, &printable)?;
        }
        return Ok(());
    }

    let handle = Poller::from_config(&config).spawn(page.clone());
    let mut events = handle.events();
    loop {
        let event = events.borrow().clone();
        match event {
            PollEvent::Refreshed{ .. } => {
                if let Some(printable) = page.print_view() {
                    write_output(&args.output, &printable)?;
                }
            },
            PollEvent::Stopped{ reason } => {
                log::warn!("No more refreshes: {}", reason);
                break;
            },
            PollEvent::NotStarted | PollEvent::Skipped => {},
        }
        if events.changed().await.is_err() {
            break;
        }
    }

    handle.join().await;
    Ok(())
}
