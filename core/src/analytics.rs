//! Aggregate figures for the analytics page.

use crate::{
    borrower::{BorrowerRecord, BorrowerStatus},
    rng::StreamRng,
    types::Money,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Filler ranges for the monthly chart, [min, min + span).
pub const RECOVERED_MIN: Money = 20_000;
pub const RECOVERED_SPAN: u64 = 50_000;
pub const DUE_MIN: Money = 30_000;
pub const DUE_SPAN: u64 = 80_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total:               usize,
    pub active:              usize,
    pub overdue:             usize,
    pub paid:                usize,
    pub pending:             usize,
    pub payment_in_progress: usize,
    /// overdue / total * 100, one decimal. "0.0" for an empty store.
    pub overdue_percentage:  String,
    /// Sum of amount due over Paid records.
    pub total_recovered:     Money,
    /// Sum of amount due over everything else.
    pub total_due:           Money,
}

impl AnalyticsOverview {
    pub fn compute(records: &[BorrowerRecord]) -> Self {
        let mut overview = Self {
            total:               records.len(),
            active:              0,
            overdue:             0,
            paid:                0,
            pending:             0,
            payment_in_progress: 0,
            overdue_percentage:  String::new(),
            total_recovered:     0,
            total_due:           0,
        };

        for r in records {
            match r.status {
                BorrowerStatus::Active            => overview.active += 1,
                BorrowerStatus::Overdue           => overview.overdue += 1,
                BorrowerStatus::Paid              => overview.paid += 1,
                BorrowerStatus::Pending           => overview.pending += 1,
                BorrowerStatus::PaymentInProgress => overview.payment_in_progress += 1,
            }
            if r.status == BorrowerStatus::Paid {
                overview.total_recovered += r.amount_due;
            } else {
                overview.total_due += r.amount_due;
            }
        }

        overview.overdue_percentage = percentage(overview.overdue, overview.total);
        overview
    }

    pub fn count_for(&self, status: BorrowerStatus) -> usize {
        match status {
            BorrowerStatus::Active            => self.active,
            BorrowerStatus::Overdue           => self.overdue,
            BorrowerStatus::Paid              => self.paid,
            BorrowerStatus::Pending           => self.pending,
            BorrowerStatus::PaymentInProgress => self.payment_in_progress,
        }
    }
}

fn percentage(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.0".into();
    }
    format!("{:.1}", part as f64 / whole as f64 * 100.0)
}

/// One bar of the monthly chart. Illustrative filler, not derived
/// from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyPoint {
    pub month:     String,
    pub recovered: Money,
    pub due:       Money,
}

/// `months` points ending with the month of `today`, oldest first.
pub fn monthly_series(rng: &mut StreamRng, today: NaiveDate, months: u32) -> Vec<MonthlyPoint> {
    let current = today.month0() as i64;
    (0..months as i64)
        .rev()
        .map(|back| {
            let month0 = (current - back).rem_euclid(12) as usize;
            MonthlyPoint {
                month:     MONTH_ABBREVIATIONS[month0].to_string(),
                recovered: RECOVERED_MIN + rng.next_u64_below(RECOVERED_SPAN) as Money,
                due:       DUE_MIN + rng.next_u64_below(DUE_SPAN) as Money,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub overview:     AnalyticsOverview,
    pub monthly_data: Vec<MonthlyPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn empty_store_reports_zero_percent() {
        let overview = AnalyticsOverview::compute(&[]);
        assert_eq!(overview.total, 0);
        assert_eq!(overview.overdue_percentage, "0.0");
        assert_eq!(overview.total_due, 0);
    }

    #[test]
    fn percentage_has_one_decimal() {
        assert_eq!(percentage(1, 3), "33.3");
        assert_eq!(percentage(2, 3), "66.7");
        assert_eq!(percentage(3, 3), "100.0");
    }

    #[test]
    fn monthly_series_wraps_the_year() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::Analytics);
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let series = monthly_series(&mut rng, today, 6);
        let months: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
        for p in &series {
            assert!((20_000..70_000).contains(&p.recovered), "{p:?}");
            assert!((30_000..110_000).contains(&p.due), "{p:?}");
        }
    }
}
