//! Status simulator: the cosmetic "live" status a detail view shows.
//!
//! RULE: This never reflects or changes a loan's real status.
//! It is an overlay: the stored status is displayed until the first
//! tick, then the latest history entry.

use crate::borrower::BorrowerStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed cycle. Wraps back to the start after Paid.
pub const STATUS_SEQUENCE: [BorrowerStatus; 5] = [
    BorrowerStatus::Pending,
    BorrowerStatus::PaymentInProgress,
    BorrowerStatus::Active,
    BorrowerStatus::PaymentInProgress,
    BorrowerStatus::Paid,
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusHistoryEntry {
    pub status:    BorrowerStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StatusSimulator {
    stored_status: BorrowerStatus,
    /// Position of the last status shown from the sequence.
    index:         usize,
    history:       Vec<StatusHistoryEntry>,
}

impl StatusSimulator {
    pub fn new(stored_status: BorrowerStatus) -> Self {
        Self { stored_status, index: 0, history: Vec::new() }
    }

    /// One tick: step the cycle and log the new status.
    pub fn advance(&mut self, at: DateTime<Utc>) -> &StatusHistoryEntry {
        self.index = (self.index + 1) % STATUS_SEQUENCE.len();
        self.history.push(StatusHistoryEntry {
            status:    STATUS_SEQUENCE[self.index],
            timestamp: at,
        });
        &self.history[self.history.len() - 1]
    }

    pub fn displayed_status(&self) -> BorrowerStatus {
        self.history
            .last()
            .map(|e| e.status)
            .unwrap_or(self.stored_status)
    }

    pub fn stored_status(&self) -> BorrowerStatus {
        self.stored_status
    }

    pub fn ticks(&self) -> usize {
        self.history.len()
    }

    /// Full log, oldest first.
    pub fn history(&self) -> &[StatusHistoryEntry] {
        &self.history
    }

    /// Up to `limit` entries, most recent first.
    pub fn recent(&self, limit: usize) -> Vec<StatusHistoryEntry> {
        self.history.iter().rev().take(limit).cloned().collect()
    }
}
