//! Services for fetching, aggregating and paging dashboard data

pub mod aggregator;
pub mod api_client;
pub mod dashboard;
pub mod month_bucketer;
pub mod paginator;
pub mod sequencer;
pub mod session;
pub mod validation;

pub use aggregator::Aggregator;
pub use api_client::ApiClient;
pub use dashboard::{Action, DashboardState, FetchRequest, LoadStatus};
pub use month_bucketer::{bucket_by_month, bucket_by_month_in, BucketZone};
pub use paginator::PageState;
pub use sequencer::{FetchKind, FetchSequencer, Ticket};
pub use session::SessionStore;
