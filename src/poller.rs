//! Periodic refreshes of a [`CalendarPage`]

use std::fmt::{Display, Error, Formatter};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::ClientConfig;
use crate::ids::WeekMarker;
use crate::page::{CalendarPage, Outcome};
use crate::traits::{Document, Transport};

/// Something that happened to a poller
#[derive(Clone, Debug, PartialEq)]
pub enum PollEvent {
    /// No refresh has been attempted yet
    NotStarted,
    /// The page now displays this week
    Refreshed { week: WeekMarker },
    /// This refresh was not sent, or its answer was obsolete
    Skipped,
    /// The poller will not refresh the page anymore
    Stopped { reason: String },
}

impl Display for PollEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            PollEvent::NotStarted => write!(f, "Not started"),
            PollEvent::Refreshed{week} => write!(f, "Refreshed week {}", week),
            PollEvent::Skipped => write!(f, "Refresh skipped"),
            PollEvent::Stopped{reason} => write!(f, "Stopped: {}", reason),
        }
    }
}

impl Default for PollEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// See [`PollerHandle::events`]
pub type PollReceiver = watch::Receiver<PollEvent>;


/// Refreshes a page at a fixed interval
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poller {
    interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.poll_interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start refreshing a page in a background task. The first refresh happens immediately.
    ///
    /// Refreshes that are due while the previous one is still running are skipped.
    /// The poller stops once a failure sent the page home (whichever action failed), or when the handle asks it to.
    /// Dropping the handle stops it as well.
    pub fn spawn<T, D>(&self, page: CalendarPage<T, D>) -> PollerHandle
    where
        T: Transport + 'static,
        D: Document + Send + 'static,
    {
        let (event_sender, events) = watch::channel(PollEvent::default());
        let (stop, mut stop_requested) = oneshot::channel::<()>();
        let interval = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let reason = loop {
                tokio::select! {
                    _ = &mut stop_requested => {
                        break "the poller has been stopped".to_string();
                    },
                    _ = ticker.tick() => {
                        match page.load_page().await {
                            Ok(Outcome::Applied) => feedback(&event_sender, PollEvent::Refreshed{ week: page.week() }),
                            Ok(Outcome::Left) => break "the page has been left".to_string(),
                            Ok(_) => feedback(&event_sender, PollEvent::Skipped),
                            Err(err) => break err.to_string(),
                        }
                    },
                }
            };

            log::info!("Polling of calendar {} stopped: {}", page.calendar(), reason);
            feedback(&event_sender, PollEvent::Stopped{ reason });
        });

        PollerHandle { events, stop: Some(stop), task }
    }
}

fn feedback(sender: &watch::Sender<PollEvent>, event: PollEvent) {
    log::debug!("Poller: {}", event);
    // Nobody may be listening anymore
    let _ = sender.send(event);
}


/// Controls a poller started by [`Poller::spawn`]
pub struct PollerHandle {
    events: PollReceiver,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// A channel that holds the latest [`PollEvent`]
    pub fn events(&self) -> PollReceiver {
        self.events.clone()
    }

    pub fn latest(&self) -> PollEvent {
        self.events.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        matches!(*self.events.borrow(), PollEvent::Stopped{..})
    }

    /// Ask the poller to stop, and wait until it has.
    /// A refresh that is running is completed first.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            // The poller may already be gone
            let _ = stop.send(());
        }
        self.join().await
    }

    /// Wait until the poller stops on its own
    pub async fn join(self) {
        // Keep the stop sender alive while waiting
        let _stop = self.stop;
        if let Err(err) = self.task.await {
            log::error!("The poller task failed: {}", err);
        }
    }
}
