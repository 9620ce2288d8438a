//! Request tokens that let a controller ignore stale responses.
//!
//! Every request a controller hands to the host carries the next token from
//! its `Sequencer`. When a response comes back, only the most recently issued
//! token is accepted, so an older request that resolves late can never
//! overwrite newer state.

use crate::http::HttpRequest;

#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token; every earlier token becomes stale.
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Make every issued token stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq != 0 && seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// A request the host must execute, tagged with its sequence token. The
/// response goes back to the issuing controller's `apply` with the same
/// `seq`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub seq: u64,
    pub request: HttpRequest,
}
