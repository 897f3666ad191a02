//! Keyword and repository filtering of a tab's records.

use std::collections::BTreeSet;

use super::record::DisplayRecord;

/// Filter bar state. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    keyword: Option<String>,
    repositories: BTreeSet<String>,
}

impl RecordFilter {
    /// Creates a filter that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `keyword` (case-insensitive) in the title, author, repository,
    /// either branch, or the id. Blank keywords are ignored.
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        let trimmed = keyword.trim();
        self.keyword = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    /// Adds a repository name to the allowed set (case-insensitive).
    #[must_use]
    pub fn with_repository(mut self, name: &str) -> Self {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.repositories.insert(trimmed.to_lowercase());
        }
        self
    }

    /// Whether no criteria are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.repositories.is_empty()
    }

    /// Whether the record passes every criterion.
    #[must_use]
    pub fn matches(&self, record: &DisplayRecord) -> bool {
        self.matches_repository(record) && self.matches_keyword(record)
    }

    /// Records at `indices` that pass the filter, in the same order.
    #[must_use]
    pub fn apply<'a>(
        &self,
        records: &'a [DisplayRecord],
        indices: &[usize],
    ) -> Vec<&'a DisplayRecord> {
        indices
            .iter()
            .filter_map(|&index| records.get(index))
            .filter(|record| self.matches(record))
            .collect()
    }

    fn matches_repository(&self, record: &DisplayRecord) -> bool {
        self.repositories.is_empty()
            || self
                .repositories
                .contains(&record.repository.name.to_lowercase())
    }

    fn matches_keyword(&self, record: &DisplayRecord) -> bool {
        let Some(keyword) = self.keyword.as_deref() else {
            return true;
        };
        [
            record.title.as_str(),
            record.author.display_name.as_str(),
            record.repository.name.as_str(),
            record.base_branch.as_str(),
            record.target_branch.as_str(),
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(keyword))
            || record.id.to_string().contains(keyword)
    }
}
