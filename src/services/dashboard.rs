//! Dashboard state and its update function
//!
//! All view state lives in `DashboardState` and changes only through
//! `DashboardState::update`. The update is synchronous and performs no I/O;
//! it returns the fetches the caller should run, and their results come back
//! as further actions tagged with the ticket they were issued under.

use tracing::{debug, warn};

use super::aggregator::Aggregator;
use super::api_client::ApiClient;
use super::month_bucketer::{bucket_by_month_with, BucketZone};
use super::paginator::PageState;
use super::sequencer::{FetchKind, FetchSequencer, Ticket};
use crate::types::{
    CategoryRecord, CategoryShare, CategorySummary, DishhubError, MonthBuckets, OverviewMetrics,
    Result, UserRecord,
};

/// Progress of one data feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Fetch failed; the feed shows its empty fallback
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Everything that can happen to the dashboard
#[derive(Debug)]
pub enum Action {
    /// Refetch every feed
    Refresh,
    /// Refetch a single feed
    Reload(FetchKind),
    /// Change the users-endpoint month filter (1-12) and refetch users
    SetMonthFilter(Option<u32>),
    /// All → Jan → … → Dec → All
    CycleMonthFilter,
    NextPage,
    PrevPage,
    OverviewLoaded {
        ticket: Ticket,
        result: Result<OverviewMetrics>,
    },
    CategoriesLoaded {
        ticket: Ticket,
        result: Result<Vec<CategoryRecord>>,
    },
    UsersLoaded {
        ticket: Ticket,
        result: Result<Vec<UserRecord>>,
    },
    RegisteredLoaded {
        ticket: Ticket,
        result: Result<Vec<UserRecord>>,
    },
}

/// A fetch the caller must perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Overview(Ticket),
    Categories(Ticket),
    Users { ticket: Ticket, month: Option<u32> },
    Registered(Ticket),
}

impl FetchRequest {
    pub fn ticket(&self) -> Ticket {
        match *self {
            Self::Overview(t) | Self::Categories(t) | Self::Registered(t) => t,
            Self::Users { ticket, .. } => ticket,
        }
    }
}

/// Run one fetch and wrap its outcome as the matching `Action`
pub async fn execute(client: &ApiClient, request: FetchRequest) -> Action {
    match request {
        FetchRequest::Overview(ticket) => Action::OverviewLoaded {
            ticket,
            result: client.fetch_overview().await,
        },
        FetchRequest::Categories(ticket) => Action::CategoriesLoaded {
            ticket,
            result: client.fetch_categories().await,
        },
        FetchRequest::Users { ticket, month } => Action::UsersLoaded {
            ticket,
            result: client.fetch_users(month).await,
        },
        FetchRequest::Registered(ticket) => Action::RegisteredLoaded {
            ticket,
            result: client.fetch_registered_users().await,
        },
    }
}

#[derive(Debug)]
pub struct DashboardState {
    sequencer: FetchSequencer,
    zone: BucketZone,

    pub overview: OverviewMetrics,
    pub overview_status: LoadStatus,

    pub categories: CategorySummary,
    pub distribution: Vec<CategoryShare>,
    pub categories_status: LoadStatus,

    pub month_buckets: MonthBuckets,
    /// Number of users in the last users response (before bucketing)
    pub total_users: usize,
    pub month_filter: Option<u32>,
    pub users_status: LoadStatus,

    pub registered: PageState,
    pub registered_status: LoadStatus,
}

impl DashboardState {
    pub fn new(page_size: usize, zone: BucketZone) -> Self {
        let categories = CategorySummary::placeholder();
        let distribution = Aggregator::distribution(&categories);
        Self {
            sequencer: FetchSequencer::new(),
            zone,
            overview: OverviewMetrics::default(),
            overview_status: LoadStatus::Idle,
            categories,
            distribution,
            categories_status: LoadStatus::Idle,
            month_buckets: MonthBuckets::default(),
            total_users: 0,
            month_filter: None,
            users_status: LoadStatus::Idle,
            registered: PageState::new(page_size),
            registered_status: LoadStatus::Idle,
        }
    }

    pub fn status(&self, kind: FetchKind) -> &LoadStatus {
        match kind {
            FetchKind::Overview => &self.overview_status,
            FetchKind::Categories => &self.categories_status,
            FetchKind::Users => &self.users_status,
            FetchKind::Registered => &self.registered_status,
        }
    }

    fn status_mut(&mut self, kind: FetchKind) -> &mut LoadStatus {
        match kind {
            FetchKind::Overview => &mut self.overview_status,
            FetchKind::Categories => &mut self.categories_status,
            FetchKind::Users => &mut self.users_status,
            FetchKind::Registered => &mut self.registered_status,
        }
    }

    pub fn any_loading(&self) -> bool {
        FetchKind::all().iter().any(|k| self.status(*k).is_loading())
    }

    /// True until the first feed has finished
    pub fn is_initial_load(&self) -> bool {
        !FetchKind::all()
            .iter()
            .any(|k| matches!(self.status(*k), LoadStatus::Loaded | LoadStatus::Failed(_)))
    }

    fn begin(&mut self, kind: FetchKind) -> FetchRequest {
        let ticket = self.sequencer.begin(kind);
        *self.status_mut(kind) = LoadStatus::Loading;
        match kind {
            FetchKind::Overview => FetchRequest::Overview(ticket),
            FetchKind::Categories => FetchRequest::Categories(ticket),
            FetchKind::Users => FetchRequest::Users {
                ticket,
                month: self.month_filter,
            },
            FetchKind::Registered => FetchRequest::Registered(ticket),
        }
    }

    /// Returns false (and logs) when `ticket` has been superseded
    fn accept(&self, ticket: Ticket) -> bool {
        if self.sequencer.is_current(ticket) {
            return true;
        }
        debug!(
            kind = ticket.kind.label(),
            seq = ticket.seq,
            latest = self.sequencer.latest(ticket.kind),
            "discarding stale fetch result"
        );
        false
    }

    fn fail(&mut self, kind: FetchKind, err: &DishhubError) {
        warn!(kind = kind.label(), error = %err, "fetch failed, showing fallback");
        *self.status_mut(kind) = LoadStatus::Failed(err.to_string());
    }

    /// Apply an action; returns fetches to start
    pub fn update(&mut self, action: Action) -> Vec<FetchRequest> {
        match action {
            Action::Refresh => FetchKind::all().iter().map(|k| self.begin(*k)).collect(),
            Action::Reload(kind) => vec![self.begin(kind)],
            Action::SetMonthFilter(month) => {
                self.month_filter = month.filter(|m| (1..=12).contains(m));
                vec![self.begin(FetchKind::Users)]
            }
            Action::CycleMonthFilter => {
                self.month_filter = match self.month_filter {
                    None => Some(1),
                    Some(12) => None,
                    Some(m) => Some(m + 1),
                };
                vec![self.begin(FetchKind::Users)]
            }
            Action::NextPage => {
                self.registered.next();
                Vec::new()
            }
            Action::PrevPage => {
                self.registered.prev();
                Vec::new()
            }
            Action::OverviewLoaded { ticket, result } => {
                if self.accept(ticket) {
                    match result {
                        Ok(metrics) => {
                            self.overview = metrics;
                            self.overview_status = LoadStatus::Loaded;
                        }
                        Err(e) => {
                            self.overview = OverviewMetrics::default();
                            self.fail(FetchKind::Overview, &e);
                        }
                    }
                }
                Vec::new()
            }
            Action::CategoriesLoaded { ticket, result } => {
                if self.accept(ticket) {
                    let records = match result {
                        Ok(records) => {
                            self.categories_status = LoadStatus::Loaded;
                            records
                        }
                        Err(e) => {
                            self.fail(FetchKind::Categories, &e);
                            Vec::new()
                        }
                    };
                    self.categories = Aggregator::aggregate(&records);
                    self.distribution = Aggregator::distribution(&self.categories);
                }
                Vec::new()
            }
            Action::UsersLoaded { ticket, result } => {
                if self.accept(ticket) {
                    let users = match result {
                        Ok(users) => {
                            self.users_status = LoadStatus::Loaded;
                            users
                        }
                        Err(e) => {
                            self.fail(FetchKind::Users, &e);
                            Vec::new()
                        }
                    };
                    self.total_users = users.len();
                    self.month_buckets = bucket_by_month_with(&users, self.zone);
                }
                Vec::new()
            }
            Action::RegisteredLoaded { ticket, result } => {
                if self.accept(ticket) {
                    let users = match result {
                        Ok(users) => {
                            self.registered_status = LoadStatus::Loaded;
                            users
                        }
                        Err(e) => {
                            self.fail(FetchKind::Registered, &e);
                            Vec::new()
                        }
                    };
                    self.registered.replace_items(users);
                }
                Vec::new()
            }
        }
    }
}
