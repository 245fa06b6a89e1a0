//! The weekly view of a calendar: the state behind it, and the user actions it supports.
//!
//! A [`CalendarPage`] owns the view-model ([`PageState`]) and the [`Document`] it is displayed in.
//! Every action follows the same path: read the view-model, talk to the server, update the view-model, then write
//! the resulting [`Mutation`]s to the document in one go.

use std::sync::{Arc, Mutex};

use crate::client::{Client, FlipBlockForm, WeekStep};
use crate::document::{element, Mutation};
use crate::error::RequestError;
use crate::flip::{Face, Selections};
use crate::ids::{CalendarId, TaskId, WeekMarker};
use crate::render;
use crate::reporter::Reporter;
use crate::sequence::{Priority, RequestTracker};
use crate::slot::{SlotIndex, DAYS_PER_WEEK};
use crate::traits::{Document, Transport};
use crate::utils::{find_cookie, lock};
use crate::week::WeekPayload;

/// Name of the cookie that holds the CSRF token
pub const CSRF_COOKIE: &str = "csrftoken";
/// Token sent when the page has no CSRF cookie
pub const UNKNOWN_CSRF_TOKEN: &str = "unknown";

/// What happened to the answer of a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The answer has been written to the page
    Applied,
    /// A more recent request made this answer obsolete, it has been discarded
    Stale,
    /// Nothing was done (the request was not sent, or the answer did not apply to the current state)
    Skipped,
    /// Nothing was done, because a failure already sent the page home
    Left,
}


/// Everything the page displays, rebuilt from each server answer
#[derive(Debug, Default)]
pub struct PageState {
    calendar: CalendarId,
    week: WeekMarker,
    face: Face,
    selections: Selections,
    week_requests: RequestTracker,
    task_requests: RequestTracker,
    last_week: Option<WeekPayload>,
    /// Bumped every time a week is displayed
    generation: u64,
    /// Whether a failure sent the page home
    left: bool,
}

impl PageState {
    pub fn new(calendar: CalendarId, week: WeekMarker) -> Self {
        Self { calendar, week, ..Self::default() }
    }

    /// Take a freshly received week into account, and return the writes that display it
    fn show_week(&mut self, payload: WeekPayload) -> Vec<Mutation> {
        let mut mutations = Vec::with_capacity(DAYS_PER_WEEK + 3);

        mutations.push(Mutation::set_inner_html(element::TAG_LIST, render::tag_list(&payload.tags).into_string()));
        mutations.push(Mutation::set_inner_html(element::FRONT, render::week_grid(&payload).into_string()));
        match payload.marker() {
            Some(marker) => {
                mutations.push(Mutation::set_value(element::WEEK_INFO, &marker));
                self.week = marker;
            },
            None => log::warn!("The server did not send any date for week {}", self.week),
        }
        for day in 0..DAYS_PER_WEEK {
            let label = render::weekday_label(day, payload.day_label(day));
            mutations.push(Mutation::set_inner_html(&element::weekday(day), label.into_string()));
        }

        self.selections = Selections::from_week(&payload);
        self.last_week = Some(payload);
        self.generation += 1;
        mutations
    }
}


/// A calendar page, attached to a document and a server.
///
/// Cloning a page gives another handle to the same page.
pub struct CalendarPage<T: Transport, D: Document> {
    client: Arc<Client<T>>,
    document: Arc<Mutex<D>>,
    state: Arc<Mutex<PageState>>,
    reporter: Arc<Reporter>,
}

impl<T: Transport, D: Document> Clone for CalendarPage<T, D> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            document: Arc::clone(&self.document),
            state: Arc::clone(&self.state),
            reporter: Arc::clone(&self.reporter),
        }
    }
}

impl<T: Transport, D: Document> CalendarPage<T, D> {
    /// Attach to a document, reading the calendar id and week marker from its hidden fields.
    ///
    /// This is the only time the document is read: from now on, the page state is the reference.
    pub fn attach(client: Client<T>, document: D) -> Self {
        let calendar = CalendarId::parse_lenient(&document.value(element::CALENDAR_ID).unwrap_or_default());
        let week = WeekMarker::from(document.value(element::WEEK_INFO).unwrap_or_default());
        log::info!("Attaching to calendar {}, week {:?}", calendar, week.as_str());
        if calendar.is_valid() == false {
            log::warn!("The page holds no valid calendar id, the server will be asked for calendar {}", calendar);
        }

        Self {
            client: Arc::new(client),
            document: Arc::new(Mutex::new(document)),
            state: Arc::new(Mutex::new(PageState::new(calendar, week))),
            reporter: Arc::new(Reporter::default()),
        }
    }

    /// Use a custom reporter (e.g. with another home route)
    pub fn with_reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    /// The document this page writes to
    pub fn document(&self) -> Arc<Mutex<D>> {
        Arc::clone(&self.document)
    }

    pub fn calendar(&self) -> CalendarId {
        lock(&self.state).calendar
    }

    pub fn week(&self) -> WeekMarker {
        lock(&self.state).week.clone()
    }

    pub fn face(&self) -> Face {
        lock(&self.state).face
    }

    pub fn is_selected(&self, slot: SlotIndex) -> bool {
        lock(&self.state).selections.is_selected(slot)
    }

    /// Whether a failure sent the page home. Such a page does not send requests anymore.
    pub fn has_left(&self) -> bool {
        lock(&self.state).left
    }

    /// The last week that has been displayed
    pub fn last_week(&self) -> Option<WeekPayload> {
        lock(&self.state).last_week.clone()
    }

    /// Write to the document. The state lock must be held by the caller, so that writes are not interleaved.
    fn write(&self, _state: &PageState, mutations: &[Mutation]) {
        lock(&self.document).apply_all(mutations);
    }

    /// Display a failure and leave the page
    fn report(&self, state: &mut PageState, err: &RequestError) {
        self.write(state, &self.reporter.report(err));
        state.left = true;
    }

    /// Refresh the current week. This is skipped if another week is being fetched.
    pub async fn load_page(&self) -> Result<Outcome, RequestError> {
        self.refresh(WeekStep::Current, Priority::Background).await
    }

    /// Show the week before the current one
    pub async fn previous_week(&self) -> Result<Outcome, RequestError> {
        self.refresh(WeekStep::Previous, Priority::Foreground).await
    }

    /// Show the week after the current one
    pub async fn next_week(&self) -> Result<Outcome, RequestError> {
        self.refresh(WeekStep::Next, Priority::Foreground).await
    }

    async fn refresh(&self, step: WeekStep, priority: Priority) -> Result<Outcome, RequestError> {
        let (ticket, calendar, week) = {
            let mut state = lock(&self.state);
            if state.left {
                return Ok(Outcome::Left);
            }
            match state.week_requests.begin(priority) {
                None => {
                    log::debug!("A week is already being fetched, skipping this refresh");
                    return Ok(Outcome::Skipped);
                },
                Some(ticket) => (ticket, state.calendar, state.week.clone()),
            }
        };

        let result = self.client.fetch_week(calendar, &week, step).await;

        let mut state = lock(&self.state);
        if state.week_requests.complete(ticket) == false {
            log::debug!("Discarding the answer to week request #{} ({:?})", ticket.seq(), step);
            return Ok(Outcome::Stale);
        }
        match result {
            Ok(payload) => {
                let mutations = state.show_week(payload);
                self.write(&state, &mutations);
                log::info!("Displayed week {} of calendar {}", state.week, calendar);
                Ok(Outcome::Applied)
            },
            Err(err) => {
                self.report(&mut state, &err);
                Err(err)
            },
        }
    }

    /// Drop the week request in flight, if any. Its answer will be discarded.
    pub fn cancel_pending(&self) -> bool {
        lock(&self.state).week_requests.cancel().is_some()
    }

    /// Fetch a task and show it on the back of the card
    pub async fn flip_task(&self, task: TaskId) -> Result<Outcome, RequestError> {
        let ticket = {
            let mut state = lock(&self.state);
            if state.left {
                return Ok(Outcome::Left);
            }
            match state.task_requests.begin(Priority::Foreground) {
                Some(t) => t,
                None => return Ok(Outcome::Skipped),
            }
        };

        let result = self.client.fetch_task(task).await;

        let mut state = lock(&self.state);
        if state.task_requests.complete(ticket) == false {
            log::debug!("Discarding the answer for task {}", task);
            return Ok(Outcome::Stale);
        }
        match result {
            Ok(detail) => match state.face.show_task(&detail) {
                Some(mutations) => {
                    self.write(&state, &mutations);
                    Ok(Outcome::Applied)
                },
                None => Ok(Outcome::Skipped),
            },
            Err(err) => {
                self.report(&mut state, &err);
                Err(err)
            },
        }
    }

    /// Go back from a task to the grid. Returns whether the card was turned.
    pub fn flip_back(&self) -> bool {
        let mut state = lock(&self.state);
        match state.face.show_grid() {
            Some(mutations) => {
                self.write(&state, &mutations);
                true
            },
            None => false,
        }
    }

    /// Select (or unselect) a slot for the current user.
    ///
    /// The page is updated at once, then the change is sent to the server.
    /// If the server does not acknowledge it, the change is reverted, unless another week (or a newer state of
    /// this week) has been displayed in the meantime.
    ///
    /// Returns the selection of the slot once the server has answered.
    pub async fn flip_block(&self, slot: SlotIndex) -> Result<bool, RequestError> {
        let (form, generation) = {
            let mut state = lock(&self.state);
            state.selections.toggle(slot);
            let mutation = state.selections.mutation(slot);
            self.write(&state, &[mutation]);

            let cookies = lock(&self.document).cookies();
            let form = FlipBlockForm {
                csrf_token: find_cookie(&cookies, CSRF_COOKIE).unwrap_or(UNKNOWN_CSRF_TOKEN).to_string(),
                slot,
                calendar: state.calendar,
                week: state.week.clone(),
            };
            (form, state.generation)
        };

        let result = self.client.flip_block(&form).await;

        let mut state = lock(&self.state);
        match result {
            Ok(()) => Ok(state.selections.is_selected(slot)),
            Err(err) => {
                let mut mutations = Vec::new();
                if state.generation == generation {
                    // Flips commute: undoing this one is inverting the slot, even if other flips are in flight
                    log::warn!("Slot {} could not be flipped ({}), reverting it", slot, err);
                    state.selections.toggle(slot);
                    mutations.push(state.selections.mutation(slot));
                } else {
                    log::warn!("Slot {} of week {} could not be flipped ({}), the page already shows newer data", slot, form.week, err);
                }
                mutations.extend(self.reporter.notify(&err.to_string()));
                self.write(&state, &mutations);
                Err(err)
            },
        }
    }

    /// A printable version of the last displayed week
    pub fn print_view(&self) -> Option<String> {
        lock(&self.state).last_week
            .as_ref()
            .map(|payload| render::print_view(payload).into_string())
    }
}
