use chrono::{DateTime, Duration, Utc};

/// Default quiet period before a pending request is released
pub const DEFAULT_COALESCE_WINDOW_MS: i64 = 100;

/// Identifies one submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Pending<R> {
    request: R,
    ticket: Ticket,
    submitted_at: DateTime<Utc>,
}

/// Request-coalescing queue for bursty recomputation
///
/// A submission replaces whatever is pending and restarts the window. Once the
/// window passes without a newer submission, [`Coalescer::poll`] releases the
/// request. A result computed for a ticket should only be delivered while
/// [`Coalescer::is_current`] still holds for it.
#[derive(Debug)]
pub struct Coalescer<R> {
    window: Duration,
    pending: Option<Pending<R>>,
    latest: u64,
}

impl<R> Default for Coalescer<R> {
    fn default() -> Self {
        Self::new(Duration::milliseconds(DEFAULT_COALESCE_WINDOW_MS))
    }
}

impl<R> Coalescer<R> {
    pub fn new(window: Duration) -> Self {
        Coalescer {
            window,
            pending: None,
            latest: 0,
        }
    }

    /// Queue `request`, dropping any request still waiting
    pub fn submit(&mut self, request: R, now: DateTime<Utc>) -> Ticket {
        self.latest += 1;
        let ticket = Ticket(self.latest);
        self.pending = Some(Pending {
            request,
            ticket,
            submitted_at: now,
        });
        ticket
    }

    /// Release the pending request once its window has elapsed
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<(Ticket, R)> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|p| now - p.submitted_at >= self.window);
        if !ready {
            return None;
        }
        self.pending.take().map(|p| (p.ticket, p.request))
    }

    /// Drop the pending request and invalidate every issued ticket
    pub fn cancel(&mut self) -> Option<R> {
        self.latest += 1;
        self.pending.take().map(|p| p.request)
    }

    /// True while no newer request was submitted after `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending request becomes ready, if any
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|p| p.submitted_at + self.window)
    }
}
