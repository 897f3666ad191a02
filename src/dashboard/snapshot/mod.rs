//! Immutable dashboard snapshots and the committed dashboard state.

use std::sync::Arc;

use tracing::warn;
use url::Url;

use crate::devops::error::IntakeError;
use crate::devops::models::{CurrentUser, GitRepository};
use crate::settings::Settings;

use super::filter::RecordFilter;
use super::partition::{PartitionedViews, Tab};
use super::record::DisplayRecord;
use super::sort::{ColumnComparators, SortError, SortSpec, default_order};

/// Badge counts for both tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BadgeCounts {
    /// Active tab count.
    pub active: usize,
    /// Drafts tab count.
    pub drafts: usize,
}

/// One fully loaded record set plus the ordering currently applied to it.
///
/// Records are shared between snapshots; re-sorting produces a new snapshot
/// with a new ordering and leaves this one untouched.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    records: Arc<[DisplayRecord]>,
    order: Arc<[usize]>,
    views: PartitionedViews,
    sort: Option<SortSpec>,
    comparators: ColumnComparators,
    settings: Settings,
    repositories: Arc<[GitRepository]>,
    current_user: CurrentUser,
    web_base: Url,
    page_requests: u32,
}

/// Inputs for [`DashboardSnapshot::new`].
#[derive(Debug, Clone)]
pub struct SnapshotParts {
    /// Projected records in any order.
    pub records: Vec<DisplayRecord>,
    /// Column settings in effect.
    pub settings: Settings,
    /// Project repositories, already sorted by name.
    pub repositories: Vec<GitRepository>,
    /// Identity the views are computed for.
    pub current_user: CurrentUser,
    /// Project web base for browsable links.
    pub web_base: Url,
    /// Page requests the listing took.
    pub page_requests: u32,
}

impl DashboardSnapshot {
    /// Builds a snapshot in the default order (ascending id).
    #[must_use]
    pub fn new(parts: SnapshotParts) -> Self {
        let records: Arc<[DisplayRecord]> = parts.records.into();
        let order = default_order(&records);
        let views = PartitionedViews::new(&records, &order, &parts.current_user.id);
        Self {
            comparators: ColumnComparators::for_settings(&parts.settings),
            records,
            order,
            views,
            sort: None,
            settings: parts.settings,
            repositories: parts.repositories.into(),
            current_user: parts.current_user,
            web_base: parts.web_base,
            page_requests: parts.page_requests,
        }
    }

    /// Returns a snapshot sorted by `spec`, starting from the current order.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::ColumnUnavailable`] when the column is disabled
    /// or never sortable.
    pub fn sorted(&self, spec: SortSpec) -> Result<Self, SortError> {
        let order = self.comparators.sort(&self.records, &self.order, spec)?;
        let views = PartitionedViews::new(&self.records, &order, &self.current_user.id);
        Ok(Self {
            order,
            views,
            sort: Some(spec),
            ..self.clone()
        })
    }

    /// Every record in the current order.
    pub fn ordered(&self) -> impl Iterator<Item = &DisplayRecord> + '_ {
        self.order
            .iter()
            .filter_map(|&index| self.records.get(index))
    }

    /// Records of one tab after filtering, in the current order.
    #[must_use]
    pub fn view(&self, tab: Tab, filter: &RecordFilter) -> Vec<&DisplayRecord> {
        filter.apply(&self.records, self.views.view(tab))
    }

    /// Per-tab orderings.
    #[must_use]
    pub const fn views(&self) -> &PartitionedViews {
        &self.views
    }

    /// Unfiltered badge counts for both tabs.
    #[must_use]
    pub fn badge_counts(&self) -> BadgeCounts {
        BadgeCounts {
            active: self.views.badge(Tab::Active),
            drafts: self.views.badge(Tab::Drafts),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shared record storage in projection order.
    #[must_use]
    pub fn records(&self) -> &Arc<[DisplayRecord]> {
        &self.records
    }

    /// Sort applied by the user, if any.
    #[must_use]
    pub const fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Comparators for the enabled columns.
    #[must_use]
    pub const fn comparators(&self) -> &ColumnComparators {
        &self.comparators
    }

    /// Column settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Project repositories sorted by name.
    #[must_use]
    pub fn repositories(&self) -> &[GitRepository] {
        &self.repositories
    }

    /// Identity the views were computed for.
    #[must_use]
    pub const fn current_user(&self) -> &CurrentUser {
        &self.current_user
    }

    /// Project web base.
    #[must_use]
    pub const fn web_base(&self) -> &Url {
        &self.web_base
    }

    /// Page requests the listing took.
    #[must_use]
    pub const fn page_requests(&self) -> u32 {
        self.page_requests
    }
}

/// Committed dashboard state.
#[derive(Debug, Clone, Default)]
pub enum DashboardState {
    /// No load has succeeded yet.
    #[default]
    NotLoaded,
    /// The most recent successful load.
    Loaded(Arc<DashboardSnapshot>),
}

/// Holder of the committed snapshot. Replacement is all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    state: DashboardState,
}

impl Dashboard {
    /// Creates a dashboard with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Committed snapshot, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<DashboardSnapshot>> {
        match &self.state {
            DashboardState::NotLoaded => None,
            DashboardState::Loaded(snapshot) => Some(Arc::clone(snapshot)),
        }
    }

    /// Commits a load result.
    ///
    /// On success the snapshot replaces the previous one. On failure the
    /// previous state is kept and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the load error unchanged.
    pub fn commit(
        &mut self,
        outcome: Result<DashboardSnapshot, IntakeError>,
    ) -> Result<Arc<DashboardSnapshot>, IntakeError> {
        match outcome {
            Ok(snapshot) => {
                let committed = Arc::new(snapshot);
                self.state = DashboardState::Loaded(Arc::clone(&committed));
                Ok(committed)
            }
            Err(error) => {
                warn!(
                    %error,
                    loaded = self.current().is_some(),
                    "dashboard load failed; keeping previous state"
                );
                Err(error)
            }
        }
    }

    /// Re-sorts the committed snapshot and commits the result.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::NotLoaded`] before the first successful load and
    /// [`SortError::ColumnUnavailable`] for unsortable columns.
    pub fn apply_sort(&mut self, spec: SortSpec) -> Result<Arc<DashboardSnapshot>, SortError> {
        let current = self.current().ok_or(SortError::NotLoaded)?;
        let sorted = Arc::new(current.sorted(spec)?);
        self.state = DashboardState::Loaded(Arc::clone(&sorted));
        Ok(sorted)
    }
}
