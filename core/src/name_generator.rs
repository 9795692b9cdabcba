//! Borrower names: the built-in seed roster plus a deterministic
//! generator for larger synthetic populations.

use crate::rng::StreamRng;

/// The dashboard's stock roster. Order defines borrower ids.
pub const DEFAULT_SEED_NAMES: [&str; 30] = [
    "John Smith", "Sarah Johnson", "Michael Brown", "Emily Davis",
    "David Wilson", "Jessica Martinez", "Christopher Anderson", "Amanda Taylor",
    "Matthew Thomas", "Ashley Jackson", "Daniel White", "Melissa Harris",
    "James Martin", "Nicole Thompson", "Robert Garcia", "Michelle Martinez",
    "William Rodriguez", "Stephanie Lewis", "Joseph Lee", "Rebecca Walker",
    "Charles Hall", "Laura Allen", "Thomas Young", "Kimberly King",
    "Christopher Wright", "Angela Lopez", "Daniel Hill", "Brenda Scott",
    "Mark Green", "Deborah Adams",
];

pub struct NameGenerator;

impl NameGenerator {
    /// Generate a full name (first + last) deterministically.
    pub fn generate_full_name(rng: &mut StreamRng) -> String {
        let first = rng.pick(FIRST_NAMES);
        let last = rng.pick(LAST_NAMES);
        format!("{first} {last}")
    }

    /// `n` names drawn from the curated lists. Duplicates are allowed;
    /// borrower identity comes from id and loan id, not the name.
    pub fn roster(rng: &mut StreamRng, n: usize) -> Vec<String> {
        (0..n).map(|_| Self::generate_full_name(rng)).collect()
    }
}

const FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph",
    "Thomas", "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Steven", "Paul",
    "Andrew", "Joshua", "Kevin", "Brian", "George", "Edward", "Ryan", "Jacob",
    "Nicholas", "Eric", "Samuel", "Gregory", "Patrick", "Henry",
    "Mary", "Patricia", "Jennifer", "Linda", "Barbara", "Elizabeth", "Susan",
    "Jessica", "Sarah", "Karen", "Lisa", "Nancy", "Margaret", "Sandra", "Ashley",
    "Kimberly", "Emily", "Donna", "Michelle", "Amanda", "Melissa", "Deborah",
    "Stephanie", "Rebecca", "Laura", "Angela", "Brenda", "Nicole", "Helen", "Rachel",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
    "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
    "White", "Harris", "Sanchez", "Clark", "Ramirez", "Lewis", "Robinson",
    "Walker", "Young", "Allen", "King", "Wright", "Scott", "Torres", "Nguyen",
    "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera",
    "Campbell", "Mitchell", "Carter", "Roberts", "Patel", "Chen", "Kim", "Reyes",
];
