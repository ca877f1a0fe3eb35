//! Tracks the `{ data, loading, error }` triple of one remote call site.
//!
//! Every call takes a [`Ticket`] stamped with a generation number. Only the newest ticket may
//! settle; answers to older tickets are dropped so a slow response cannot overwrite a faster,
//! later one.

use anyhow::Result;

/// Proof that a request was started; hand it back to [`RequestState::settle`].
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    Applied,
    Stale,
}

#[derive(Clone, Debug)]
pub struct RequestState<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> RequestState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a request. Clears the previous error and supersedes any ticket still out.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ticket(self.generation)
    }

    /// Records the result of the request `ticket` was issued for.
    ///
    /// Data from an earlier success is kept when a later request fails.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T>) -> Settled {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.generation,
                "dropping stale response"
            );
            return Settled::Stale;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %format!("{:#}", err), "request failed");
                self.error = Some(format!("{:#}", err));
            }
        }
        Settled::Applied
    }

    /// Runs `f` as one request: begin, call, settle.
    pub fn execute(&mut self, f: impl FnOnce() -> Result<T>) -> &Self {
        let ticket = self.begin();
        let result = f();
        self.settle(ticket, result);
        self
    }

    /// Forgets the data and error and invalidates outstanding tickets.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.data = None;
        self.loading = false;
        self.error = None;
    }

    pub fn take(&mut self) -> Option<T> {
        self.data.take()
    }
}

#[cfg(test)]
#[path = "tests/request/request_tests.rs"]
mod tests;
