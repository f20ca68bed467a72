//! Cluster selection — the single filter shared by every derived view.
//!
//! RULE: there is exactly one selection state per session. Every dataset
//! that carries a cluster id applies the same derivation against it;
//! nothing caches a filtered result across selection changes.

use crate::types::ClusterId;
use serde::{Deserialize, Serialize};

/// The active cluster filter.
///
/// `All` is the "no filter" sentinel: every row passes. Selecting an id
/// with no matching rows is not an error; the filtered view is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterSelection {
    All,
    Only(ClusterId),
}

impl ClusterSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, ClusterSelection::All)
    }

    pub fn matches(&self, cluster: &str) -> bool {
        match self {
            ClusterSelection::All => true,
            ClusterSelection::Only(id) => id == cluster,
        }
    }

    /// Pure filter derivation. Rows keep their input order. Rows with no
    /// cluster membership (see `ClusterScoped::cluster_id`) only survive
    /// the unfiltered view — no concrete id can ever match them.
    pub fn apply<T: ClusterScoped + Clone>(&self, rows: &[T]) -> Vec<T> {
        rows.iter()
            .filter(|row| match row.cluster_id() {
                Some(cluster) => self.matches(cluster),
                None => self.is_all(),
            })
            .cloned()
            .collect()
    }
}

impl Default for ClusterSelection {
    fn default() -> Self {
        ClusterSelection::All
    }
}

/// Implemented by every row type the selection filter applies to.
pub trait ClusterScoped {
    /// The row's cluster membership, if it has one.
    fn cluster_id(&self) -> Option<&str>;
}
