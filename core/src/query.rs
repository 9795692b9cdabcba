//! Listing queries: filter, sort, paginate.
//!
//! Pure functions over a record slice. The service layer adds latency;
//! nothing here touches the store's contents.

use crate::borrower::BorrowerRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Columns the listing can be ordered by. Wire names match the
/// record's JSON field names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    CustomerName,
    LoanId,
    Status,
    AmountDue,
    DueDate,
    StartDate,
    Email,
    Phone,
    LoanAmount,
    InterestRate,
}

impl SortField {
    /// Resolve a column name. Empty or unknown names mean "no sort".
    pub fn parse(name: &str) -> Option<Self> {
        let field = match name {
            "id"           => Self::Id,
            "customerName" => Self::CustomerName,
            "loanId"       => Self::LoanId,
            "status"       => Self::Status,
            "amountDue"    => Self::AmountDue,
            "dueDate"      => Self::DueDate,
            "startDate"    => Self::StartDate,
            "email"        => Self::Email,
            "phone"        => Self::Phone,
            "loanAmount"   => Self::LoanAmount,
            "interestRate" => Self::InterestRate,
            _ => return None,
        };
        Some(field)
    }

    /// Natural-order comparison on this column. Text compares
    /// case-insensitively.
    fn compare(&self, a: &BorrowerRecord, b: &BorrowerRecord) -> Ordering {
        match self {
            Self::Id           => a.id.cmp(&b.id),
            Self::CustomerName => cmp_folded(&a.customer_name, &b.customer_name),
            Self::LoanId       => cmp_folded(&a.loan_id, &b.loan_id),
            Self::Status       => cmp_folded(a.status.label(), b.status.label()),
            Self::AmountDue    => a.amount_due.cmp(&b.amount_due),
            Self::DueDate      => a.due_date.cmp(&b.due_date),
            Self::StartDate    => a.start_date.cmp(&b.start_date),
            Self::Email        => cmp_folded(&a.email, &b.email),
            Self::Phone        => cmp_folded(&a.phone, &b.phone),
            Self::LoanAmount   => a.loan_amount.cmp(&b.loan_amount),
            Self::InterestRate => a.interest_rate.cmp(&b.interest_rate),
        }
    }
}

fn cmp_folded(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Listing request. Missing JSON fields take the dashboard defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ListCriteria {
    pub page:       u32,
    pub limit:      u32,
    pub search:     String,
    /// Column name; empty or unknown leaves the store order.
    pub sort_by:    String,
    pub sort_order: SortOrder,
}

impl Default for ListCriteria {
    fn default() -> Self {
        Self {
            page:       DEFAULT_PAGE,
            limit:      DEFAULT_LIMIT,
            search:     String::new(),
            sort_by:    String::new(),
            sort_order: SortOrder::Asc,
        }
    }
}

impl ListCriteria {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = sort_by.into();
        self.sort_order = order;
        self
    }

    /// Page and limit are at least 1.
    fn normalized(&self) -> (u32, u32) {
        (self.page.max(1), self.limit.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    pub data:        Vec<T>,
    pub total:       usize,
    pub page:        u32,
    pub limit:       u32,
    pub total_pages: usize,
}

/// Case-insensitive substring match on name, loan id or status label.
pub fn matches_search(record: &BorrowerRecord, needle_lower: &str) -> bool {
    record.customer_name.to_lowercase().contains(needle_lower)
        || record.loan_id.to_lowercase().contains(needle_lower)
        || record.status.label().to_lowercase().contains(needle_lower)
}

/// Order in place. Ties fall back to ascending id whatever the
/// direction, so the result is a strict total order.
pub fn sort_records(records: &mut [&BorrowerRecord], field: SortField, order: SortOrder) {
    records.sort_by(|a, b| {
        let primary = field.compare(a, b);
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

/// Run one listing query over `records`.
pub fn list_page(records: &[BorrowerRecord], criteria: &ListCriteria) -> QueryResult<BorrowerRecord> {
    let (page, limit) = criteria.normalized();

    let mut filtered: Vec<&BorrowerRecord> = if criteria.search.is_empty() {
        records.iter().collect()
    } else {
        let needle = criteria.search.to_lowercase();
        records.iter().filter(|r| matches_search(r, &needle)).collect()
    };

    if let Some(field) = SortField::parse(&criteria.sort_by) {
        sort_records(&mut filtered, field, criteria.sort_order);
    }

    let total = filtered.len();
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let data = filtered
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    QueryResult {
        data,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit as usize),
    }
}
