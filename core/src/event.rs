//! Detail-session events: what a subscriber to a session sees.
//!
//! RULE: Variants are appended, never removed or reordered.

use crate::{
    simulator::StatusHistoryEntry,
    types::{BorrowerId, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    StatusAdvanced {
        session_id:  SessionId,
        borrower_id: BorrowerId,
        tick:        u64,
        entry:       StatusHistoryEntry,
    },
    Closed {
        session_id: SessionId,
        ticks:      u64,
    },
    Opened {
        session_id:  SessionId,
        borrower_id: BorrowerId,
    },
}
