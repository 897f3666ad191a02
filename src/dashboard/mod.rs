//! The pull request aggregation pipeline.
//!
//! A load drains the paginated listing, correlates builds, fetches open review
//! threads, and projects everything into [`DisplayRecord`]s. The result is an
//! immutable [`DashboardSnapshot`] that can be re-sorted, partitioned into the
//! Active and Drafts tabs, and filtered without touching the records.

pub mod aggregator;
pub mod build_status;
pub mod comments;
pub mod correlator;
pub mod filter;
pub mod loader;
pub mod partition;
pub mod record;
pub mod snapshot;
pub mod sort;
pub mod vote;

pub use aggregator::{AggregatedPullRequests, PullRequestAggregator};
pub use build_status::BuildStatusView;
pub use comments::{CommentEnricher, EnrichedPullRequest};
pub use correlator::BuildIndex;
pub use filter::RecordFilter;
pub use loader::{DashboardLoader, DashboardSources, resolve_current_user};
pub use partition::{PartitionedViews, Tab};
pub use record::{DisplayRecord, ProjectionInput, project_record, strip_ref_prefix};
pub use snapshot::{BadgeCounts, Dashboard, DashboardSnapshot, DashboardState, SnapshotParts};
pub use sort::{
    ColumnComparators, Comparator, SortDirection, SortError, SortSpec, default_order,
    locale_compare,
};
pub use vote::{NO_VOTE_CODE, VoteStatus};
