//! The borrower store: the canonical, immutable record set.
//!
//! RULE: Records are generated once, at construction, and never
//! mutated afterwards. There is no create/update/delete.
//! Everything that wants "live" data (the detail view's status feed)
//! keeps its own overlay instead of touching the store.

use crate::{
    borrower::{BorrowerRecord, BorrowerStatus, InterestRate},
    clock::DeskClock,
    config::DeskConfig,
    name_generator::NameGenerator,
    rng::{RngBank, StreamRng, StreamSlot},
    types::{BorrowerId, Money},
};
use chrono::{Duration, NaiveDate};

/// Amount due is drawn from [AMOUNT_DUE_MIN, AMOUNT_DUE_MIN + AMOUNT_DUE_SPAN).
pub const AMOUNT_DUE_MIN: Money = 5_000;
pub const AMOUNT_DUE_SPAN: u64 = 50_000;
/// Loan amount = amount due + [0, LOAN_EXTRA_SPAN).
pub const LOAN_EXTRA_SPAN: u64 = 20_000;
/// Due dates fall in today + [-DUE_WINDOW_DAYS, DUE_WINDOW_DAYS).
pub const DUE_WINDOW_DAYS: i64 = 30;
pub const LOAN_TERM_DAYS: i64 = 90;
/// Interest rate in hundredths of a percent: [3.00, 8.00).
pub const RATE_MIN_HUNDREDTHS: u32 = 300;
pub const RATE_SPAN_HUNDREDTHS: u64 = 500;
/// Largest book whose loan ids still fit LOAN-NNNN.
pub const MAX_BORROWERS: usize = 9_999;

#[derive(Debug, Clone, Default)]
pub struct BorrowerStore {
    records: Vec<BorrowerRecord>,
}

impl BorrowerStore {
    /// One record per name, in input order. Field values come from `rng`,
    /// so the same seed, names and `today` always yield the same store.
    ///
    /// At most `MAX_BORROWERS` names; loan ids are four digits.
    pub fn initialize<S: AsRef<str>>(
        seed_names: &[S],
        rng: &mut StreamRng,
        today: NaiveDate,
    ) -> Self {
        debug_assert!(
            seed_names.len() <= MAX_BORROWERS,
            "{} names exceed the LOAN-NNNN range",
            seed_names.len()
        );
        let records = seed_names
            .iter()
            .enumerate()
            .map(|(i, name)| generate_record(i, name.as_ref(), rng, today))
            .collect::<Vec<_>>();

        log::debug!(
            "store: generated {} borrowers from stream '{}' (today={today})",
            records.len(),
            rng.name
        );
        Self { records }
    }

    /// Build the store a desk runs on: the configured roster (or a
    /// generated one when `population` is set), dated from `clock`.
    pub fn from_config(config: &DeskConfig, clock: &DeskClock) -> Self {
        let bank = RngBank::new(config.seed);
        let mut rng = bank.for_stream(StreamSlot::Borrowers);
        match config.population {
            Some(n) => {
                let mut roster_rng = bank.for_stream(StreamSlot::Roster);
                let names = NameGenerator::roster(&mut roster_rng, n);
                Self::initialize(names.as_slice(), &mut rng, clock.today())
            }
            None => Self::initialize(config.seed_names.as_slice(), &mut rng, clock.today()),
        }
    }

    /// Wrap hand-built records. Callers own the id/loan id uniqueness
    /// invariant; used for fixed scenarios and tooling.
    pub fn from_records(records: Vec<BorrowerRecord>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<_> = records.iter().map(|r| r.id).collect();
                ids.sort_unstable();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate borrower ids"
        );
        Self { records }
    }

    pub fn records(&self) -> &[BorrowerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: BorrowerId) -> Option<&BorrowerRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

fn generate_record(
    index: usize,
    name: &str,
    rng: &mut StreamRng,
    today: NaiveDate,
) -> BorrowerRecord {
    let status = *rng.pick(&BorrowerStatus::ALL);
    let amount_due = AMOUNT_DUE_MIN + rng.next_u64_below(AMOUNT_DUE_SPAN) as Money;
    let offset = rng.next_i64_in(-DUE_WINDOW_DAYS, DUE_WINDOW_DAYS);
    let due_date = today + Duration::days(offset);

    let area = rng.next_i64_in(100, 1_000);
    let exchange = rng.next_i64_in(100, 1_000);
    let line = rng.next_i64_in(1_000, 10_000);

    let loan_amount = amount_due + rng.next_u64_below(LOAN_EXTRA_SPAN) as Money;
    let rate = RATE_MIN_HUNDREDTHS + rng.next_u64_below(RATE_SPAN_HUNDREDTHS) as u32;

    BorrowerRecord {
        id: index as BorrowerId + 1,
        customer_name: name.to_string(),
        loan_id: BorrowerRecord::format_loan_id(index),
        status,
        amount_due,
        due_date,
        email: BorrowerRecord::format_email(name),
        phone: format!("+1-{area}-{exchange}-{line}"),
        loan_amount,
        interest_rate: InterestRate::from_hundredths(rate),
        start_date: due_date - Duration::days(LOAN_TERM_DAYS),
    }
}
