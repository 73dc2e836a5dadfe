//! Request sequencing so a superseded fetch never overwrites newer data

use serde::Serialize;

/// The independent data feeds of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FetchKind {
    Overview,
    Categories,
    Users,
    Registered,
}

impl FetchKind {
    pub fn all() -> &'static [FetchKind] {
        &[
            FetchKind::Overview,
            FetchKind::Categories,
            FetchKind::Users,
            FetchKind::Registered,
        ]
    }

    fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Categories => 1,
            Self::Users => 2,
            Self::Registered => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Categories => "categories",
            Self::Users => "users",
            Self::Registered => "registered",
        }
    }
}

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: FetchKind,
    pub seq: u64,
}

/// Issues monotonically increasing tickets per fetch kind.
///
/// Only the most recently issued ticket of a kind is current; results carrying
/// any older ticket are stale and must be discarded. Ordering is by issue
/// sequence, never by arrival.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: [u64; 4],
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any in-flight one of the same kind
    pub fn begin(&mut self, kind: FetchKind) -> Ticket {
        let slot = &mut self.latest[kind.index()];
        *slot += 1;
        Ticket { kind, seq: *slot }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.seq != 0 && self.latest[ticket.kind.index()] == ticket.seq
    }

    pub fn latest(&self, kind: FetchKind) -> u64 {
        self.latest[kind.index()]
    }
}
