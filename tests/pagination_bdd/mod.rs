//! Support modules for the pagination BDD tests.

#[path = "../support/azure_double.rs"]
pub(crate) mod azure_double;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use state::{PaginationState, collect_listing};
