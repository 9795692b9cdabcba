use crate::{
    analytics::Analytics,
    borrower::BorrowerRecord,
    query::{ListCriteria, QueryResult},
    session::DetailView,
    types::BorrowerId,
};
use serde::{Deserialize, Serialize};

/// A borrower reference as a caller hands it over: a number, or text
/// that should name one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BorrowerRef {
    Id(BorrowerId),
    Raw(String),
}

/// Everything the rendering side can ask of the desk.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeskCommand {
    // ── Queries ───────────────────────────────────
    List {
        #[serde(default)]
        criteria: ListCriteria,
    },
    Get {
        id: BorrowerRef,
    },
    Analytics,

    // ── Detail view ───────────────────────────────
    OpenDetail {
        id: BorrowerRef,
    },
    Detail,
    CloseDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskResponse {
    Page { result: QueryResult<BorrowerRecord> },
    Borrower { borrower: BorrowerRecord },
    Analytics { analytics: Analytics },
    Detail { view: DetailView },
    Closed { ticks: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_from_json_lines() {
        let cmd: DeskCommand = serde_json::from_str(
            r#"{"cmd":"list","criteria":{"page":2,"sortBy":"amountDue","sortOrder":"desc"}}"#,
        )
        .unwrap();
        match cmd {
            DeskCommand::List { criteria } => {
                assert_eq!(criteria.page, 2);
                assert_eq!(criteria.limit, 10);
                assert_eq!(criteria.sort_by, "amountDue");
            }
            other => panic!("unexpected {other:?}"),
        }

        let get: DeskCommand = serde_json::from_str(r#"{"cmd":"get","id":7}"#).unwrap();
        assert!(matches!(get, DeskCommand::Get { id: BorrowerRef::Id(7) }));

        let raw: DeskCommand = serde_json::from_str(r#"{"cmd":"open_detail","id":"12"}"#).unwrap();
        assert!(matches!(raw, DeskCommand::OpenDetail { id: BorrowerRef::Raw(ref s) } if s == "12"));

        let bare: DeskCommand = serde_json::from_str(r#"{"cmd":"list"}"#).unwrap();
        assert!(matches!(bare, DeskCommand::List { .. }));
    }
}
