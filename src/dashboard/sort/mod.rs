//! Column sorting over immutable record sets.
//!
//! Sorting never touches the records themselves. It produces a new ordering
//! (indices into the shared record slice) so the previous ordering stays valid
//! for anyone still holding it.

use std::cmp::Ordering;
use std::sync::{Arc, LazyLock};

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use thiserror::Error;
use tracing::warn;

use crate::settings::{Settings, SettingsColumn};

use super::record::DisplayRecord;

/// Three-way comparison of two records on one column.
pub type Comparator = fn(&DisplayRecord, &DisplayRecord) -> Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// A user-requested sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Column to sort on.
    pub column: SettingsColumn,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `column`.
    #[must_use]
    pub const fn ascending(column: SettingsColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `column`.
    #[must_use]
    pub const fn descending(column: SettingsColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// Errors raised when a sort cannot be applied.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SortError {
    /// The column is disabled or can never be sorted.
    #[error("column '{column}' cannot be sorted with the current settings")]
    ColumnUnavailable {
        /// Requested column.
        column: SettingsColumn,
    },
    /// No dashboard has been loaded yet.
    #[error("no dashboard has been loaded")]
    NotLoaded,
}

/// Comparators for the columns a user may sort on.
#[derive(Debug, Clone)]
pub struct ColumnComparators {
    entries: Vec<(SettingsColumn, Comparator)>,
}

impl ColumnComparators {
    /// Comparators for every enabled, sortable column.
    ///
    /// The reviewers column is never sortable.
    #[must_use]
    pub fn for_settings(settings: &Settings) -> Self {
        let entries = settings
            .enabled_columns()
            .filter_map(|column| comparator_for(column).map(|compare| (column, compare)))
            .collect();
        Self { entries }
    }

    /// Comparator for `column`, when sortable.
    #[must_use]
    pub fn comparator(&self, column: SettingsColumn) -> Option<Comparator> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == column)
            .map(|(_, compare)| *compare)
    }

    /// Sortable columns in table order.
    pub fn columns(&self) -> impl Iterator<Item = SettingsColumn> + '_ {
        self.entries.iter().map(|(column, _)| *column)
    }

    /// Reorders `order` by `spec`, keeping ties in their current order.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::ColumnUnavailable`] when the column has no
    /// comparator under the current settings.
    pub fn sort(
        &self,
        records: &[DisplayRecord],
        order: &[usize],
        spec: SortSpec,
    ) -> Result<Arc<[usize]>, SortError> {
        let compare = self
            .comparator(spec.column)
            .ok_or(SortError::ColumnUnavailable {
                column: spec.column,
            })?;

        let mut rows: Vec<(usize, &DisplayRecord)> = order
            .iter()
            .filter_map(|&index| records.get(index).map(|record| (index, record)))
            .collect();
        rows.sort_by(|(_, left), (_, right)| match spec.direction {
            SortDirection::Ascending => compare(left, right),
            SortDirection::Descending => compare(left, right).reverse(),
        });

        Ok(rows.into_iter().map(|(index, _)| index).collect())
    }
}

/// Ordering used before any user sort: ascending pull request id.
#[must_use]
pub fn default_order(records: &[DisplayRecord]) -> Arc<[usize]> {
    let mut rows: Vec<(usize, u32)> = records
        .iter()
        .enumerate()
        .map(|(index, record)| (index, record.id))
        .collect();
    rows.sort_by_key(|&(_, id)| id);
    rows.into_iter().map(|(index, _)| index).collect()
}

static ROOT_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);
    Collator::try_new(CollatorPreferences::default(), options)
        .inspect_err(|error| warn!(%error, "root collator unavailable; using simple ordering"))
        .ok()
});

/// Locale-aware string ordering using the root collation at tertiary
/// strength.
///
/// Accented letters sort next to their base letter and lowercase sorts
/// before uppercase when the strings otherwise tie.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
///
/// use prboard::dashboard::locale_compare;
///
/// assert_eq!(locale_compare("alice", "Bob"), Ordering::Less);
/// assert_eq!(locale_compare("Émile", "Frank"), Ordering::Less);
/// assert_eq!(locale_compare("bob", "Bob"), Ordering::Less);
/// ```
#[must_use]
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    ROOT_COLLATOR.as_ref().map_or_else(
        || {
            left.to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| right.cmp(left))
        },
        |collator| collator.compare(left, right),
    )
}

const fn comparator_for(column: SettingsColumn) -> Option<Comparator> {
    let compare: Comparator = match column {
        SettingsColumn::Author => compare_author,
        SettingsColumn::Created => compare_created,
        SettingsColumn::Details => compare_id,
        SettingsColumn::Repository => compare_repository,
        SettingsColumn::Comments => compare_comments,
        SettingsColumn::BuildStatus => compare_build_status,
        SettingsColumn::MyVote => compare_vote,
        SettingsColumn::Reviewers => return None,
    };
    Some(compare)
}

fn compare_author(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    locale_compare(&left.author.display_name, &right.author.display_name)
}

fn compare_created(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    left.creation_date.cmp(&right.creation_date)
}

fn compare_id(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    left.id.cmp(&right.id)
}

fn compare_repository(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    locale_compare(&left.repository.name, &right.repository.name)
}

fn compare_comments(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    left.open_thread_count().cmp(&right.open_thread_count())
}

fn compare_build_status(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    locale_compare(left.build_status.label(), right.build_status.label())
}

fn compare_vote(left: &DisplayRecord, right: &DisplayRecord) -> Ordering {
    locale_compare(left.vote.label(), right.vote.label())
}
