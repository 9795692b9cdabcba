//! Shared primitive types used across the desk.

/// Stable integer identifier of a borrower record. 1-based, input order.
pub type BorrowerId = u64;

/// Whole currency units. All monetary fields use this.
pub type Money = i64;

/// Identifier of one open detail view.
pub type SessionId = uuid::Uuid;
