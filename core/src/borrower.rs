//! The borrower record: one loan account as the dashboard sees it.

use crate::types::{BorrowerId, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BorrowerStatus {
    Active,
    Overdue,
    Paid,
    Pending,
    #[serde(rename = "Payment in progress")]
    PaymentInProgress,
}

impl BorrowerStatus {
    /// Every status, in the order the generator draws from.
    pub const ALL: [BorrowerStatus; 5] = [
        Self::Active,
        Self::Overdue,
        Self::Paid,
        Self::Pending,
        Self::PaymentInProgress,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active            => "Active",
            Self::Overdue           => "Overdue",
            Self::Paid              => "Paid",
            Self::Pending           => "Pending",
            Self::PaymentInProgress => "Payment in progress",
        }
    }
}

impl fmt::Display for BorrowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Percentage held as hundredths, so it always renders with exactly
/// two decimals ("4.07"). On the wire it is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterestRate(u32);

impl InterestRate {
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::str::FromStr for InterestRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = s.split_once('.').unwrap_or((s, "0"));
        let whole: u32 = whole.parse().map_err(|_| format!("bad interest rate '{s}'"))?;
        let frac: u32 = match frac.len() {
            1 => frac.parse::<u32>().map(|f| f * 10),
            2 => frac.parse::<u32>(),
            _ => return Err(format!("interest rate '{s}' needs 1-2 decimals")),
        }
        .map_err(|_| format!("bad interest rate '{s}'"))?;
        Ok(Self(whole * 100 + frac))
    }
}

impl Serialize for InterestRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InterestRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerRecord {
    pub id:            BorrowerId,
    pub customer_name: String,
    pub loan_id:       String,
    pub status:        BorrowerStatus,
    pub amount_due:    Money,
    pub due_date:      NaiveDate,
    pub email:         String,
    pub phone:         String,
    pub loan_amount:   Money,
    pub interest_rate: InterestRate,
    pub start_date:    NaiveDate,
}

impl BorrowerRecord {
    /// `LOAN-0001` for the first record.
    pub fn format_loan_id(index: usize) -> String {
        format!("LOAN-{:04}", index + 1)
    }

    /// Lowercased name with its first space turned into a dot.
    pub fn format_email(name: &str) -> String {
        format!("{}@email.com", name.to_lowercase().replacen(' ', ".", 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip_through_json() {
        let json = serde_json::to_string(&BorrowerStatus::PaymentInProgress).unwrap();
        assert_eq!(json, "\"Payment in progress\"");
        let back: BorrowerStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BorrowerStatus::PaymentInProgress);
    }

    #[test]
    fn interest_rate_always_has_two_decimals() {
        assert_eq!(InterestRate::from_hundredths(300).to_string(), "3.00");
        assert_eq!(InterestRate::from_hundredths(407).to_string(), "4.07");
        assert_eq!(InterestRate::from_hundredths(799).to_string(), "7.99");
        assert_eq!("5.1".parse::<InterestRate>().unwrap().hundredths(), 510);
        assert!("5.123".parse::<InterestRate>().is_err());
    }

    #[test]
    fn derived_display_fields() {
        assert_eq!(BorrowerRecord::format_loan_id(0), "LOAN-0001");
        assert_eq!(BorrowerRecord::format_loan_id(29), "LOAN-0030");
        assert_eq!(
            BorrowerRecord::format_email("Christopher Anderson"),
            "christopher.anderson@email.com"
        );
        assert_eq!(BorrowerRecord::format_email("Mary Ann Lee"), "mary.ann lee@email.com");
    }
}
