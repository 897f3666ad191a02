//! Splitting the record set into the Active and Drafts tabs.

use std::fmt;
use std::str::FromStr;

use crate::devops::error::IntakeError;

use super::record::DisplayRecord;

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    /// Every non-draft pull request.
    #[default]
    Active,
    /// The current user's own drafts.
    Drafts,
}

impl Tab {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Drafts => "drafts",
        }
    }

    /// Tab caption.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Active => "Active Pull Requests",
            Self::Drafts => "My Drafts",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "drafts" | "draft" => Ok(Self::Drafts),
            other => Err(IntakeError::Configuration {
                message: format!("unknown tab '{other}' (expected 'active' or 'drafts')"),
            }),
        }
    }
}

/// Per-tab orderings derived from one sorted record order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedViews {
    active: Vec<usize>,
    drafts: Vec<usize>,
}

impl PartitionedViews {
    /// Partitions `order`, preserving its sequence within each view.
    ///
    /// Other users' drafts appear in neither view.
    #[must_use]
    pub fn new(records: &[DisplayRecord], order: &[usize], current_user_id: &str) -> Self {
        let mut views = Self::default();
        for &index in order {
            let Some(record) = records.get(index) else {
                continue;
            };
            if !record.is_draft {
                views.active.push(index);
            } else if record.author.id == current_user_id {
                views.drafts.push(index);
            }
        }
        views
    }

    /// Record indices in the given tab, in sort order.
    #[must_use]
    pub fn view(&self, tab: Tab) -> &[usize] {
        match tab {
            Tab::Active => &self.active,
            Tab::Drafts => &self.drafts,
        }
    }

    /// Badge count for the given tab.
    #[must_use]
    pub fn badge(&self, tab: Tab) -> usize {
        self.view(tab).len()
    }
}
