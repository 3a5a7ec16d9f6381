//! Normalized lifecycle stages for tracked proposals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized lifecycle stage of a legislative proposal.
///
/// Government feeds report status as free text plus an optional numeric
/// code; the status normalizer collapses both onto this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleStatus {
    /// Actively moving through the houses. Also the catch-all default when
    /// no other signal is present.
    InProgress,
    Approved,
    Archived,
    Vetoed,
    /// In committee or awaiting a rapporteur's opinion.
    UnderReview,
    /// Scheduled for, or in, a floor vote.
    UnderVote,
    Withdrawn,
}

impl LifecycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Approved => "approved",
            Self::Archived => "archived",
            Self::Vetoed => "vetoed",
            Self::UnderReview => "under review",
            Self::UnderVote => "under vote",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Terminal statuses can no longer change; their progress is pinned at 100%.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Approved | Self::Archived | Self::Vetoed | Self::Withdrawn
        )
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
