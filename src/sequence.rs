//! Ordering of concurrent requests.
//!
//! Answers do not come back in the order requests were sent. Every request takes a [`Ticket`] from a
//! [`RequestTracker`], and only the answer to the current ticket may be applied to the page.

/// Identifies a request that has been sent
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// How a new request interacts with the one in flight (if any)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    /// Periodic refreshes: not sent while another request is in flight
    Background,
    /// User actions: always sent, and the request in flight (if any) becomes stale
    Foreground,
}

/// Hands out tickets with increasing sequence numbers, and tracks which one is current
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    last_issued: u64,
    in_flight: Option<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a ticket for a new request, or `None` if a background request should not be sent
    pub fn begin(&mut self, priority: Priority) -> Option<Ticket> {
        if priority == Priority::Background && self.in_flight.is_some() {
            return None;
        }

        self.last_issued += 1;
        if let Some(superseded) = self.in_flight.replace(self.last_issued) {
            log::debug!("Request #{} is superseded by #{}", superseded, self.last_issued);
        }
        Some(Ticket { seq: self.last_issued })
    }

    /// Mark a request as answered.
    ///
    /// Returns whether its answer should be used, i.e. whether it was still the current request.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket.seq) {
            log::debug!("Request #{} is stale", ticket.seq);
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Forget the request in flight. Its answer will be discarded.
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.in_flight.take().map(|seq| Ticket { seq })
    }
}
