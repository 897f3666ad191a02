//! Matching builds to the pull requests that queued them.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::devops::models::RawBuild;

/// Builds keyed by the pull request number in their trigger metadata.
///
/// When several builds name the same pull request, the first one in the
/// listing's order is kept. The listing is not assumed to be sorted by
/// recency, so "first" is positional only.
#[derive(Debug, Clone, Default)]
pub struct BuildIndex {
    by_pull_request: HashMap<String, RawBuild>,
}

impl BuildIndex {
    /// Indexes the listing. Builds without a `pr.number` trigger are skipped.
    #[must_use]
    pub fn new(builds: Vec<RawBuild>) -> Self {
        let mut by_pull_request = HashMap::with_capacity(builds.len());
        for build in builds {
            let Some(number) = build.pull_request_number().map(ToOwned::to_owned) else {
                continue;
            };
            if let Entry::Vacant(slot) = by_pull_request.entry(number) {
                slot.insert(build);
            }
        }
        Self { by_pull_request }
    }

    /// Build queued for the pull request, compared by decimal id string.
    #[must_use]
    pub fn lookup(&self, pull_request_id: u32) -> Option<&RawBuild> {
        self.by_pull_request.get(&pull_request_id.to_string())
    }

    /// Number of distinct pull requests with a build.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_pull_request.len()
    }

    /// Whether no build named a pull request.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_pull_request.is_empty()
    }
}
