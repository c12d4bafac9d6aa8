// ============================================================
// Layer 4 — Synthetic Data Generator
// ============================================================
// Produces one Observation per consecutive calendar day.
//
// Per-day rules:
//   holiday      → 5% chance, independent of everything else
//   exam week    → May or December, day-of-month 10..=20
//   librarian    → present 90% of days
//   campus count → holiday U[10,50] > weekend U[30,100]
//                  > exam U[320,350] > normal U[250,330]
//   library      → 0 when holiday AND no librarian, otherwise
//                  trunc(campus * rate) + U[-10,10], clamped
//
// Rate precedence matters: the weekend override is applied
// AFTER the exam-week override, so an exam-week Saturday gets 0.1.
//
// Reference: rand crate documentation (SeedableRng, Rng::gen_range)

use chrono::{Datelike, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::observation::Observation;

const HOLIDAY_PROBABILITY:   f64 = 0.05;
const LIBRARIAN_PROBABILITY: f64 = 0.90;

const NORMAL_RATE:  f64 = 0.3;
const EXAM_RATE:    f64 = 0.8;
const WEEKEND_RATE: f64 = 0.1;

const NOISE: i64 = 10;

// ─── Generation Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// First day of the generated range
    pub start_date: NaiveDate,

    /// Number of consecutive days to generate
    pub days: usize,

    /// Fixed seed for reproducible data; None draws from entropy
    pub seed: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            days:       730,
            seed:       None,
        }
    }
}

// ─── DataGenerator ───────────────────────────────────────────────────────────
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    /// Seeded generator, or one seeded from OS entropy when `seed` is None.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Generate exactly `days` observations starting at `start`,
    /// one per calendar day with no gaps.
    pub fn generate(&mut self, start: NaiveDate, days: usize) -> Vec<Observation> {
        let observations: Vec<Observation> = start
            .iter_days()
            .take(days)
            .map(|date| self.generate_day(date))
            .collect();

        tracing::debug!(
            "Generated {} observations starting {}",
            observations.len(),
            start
        );
        observations
    }

    fn generate_day(&mut self, date: NaiveDate) -> Observation {
        let day_of_week = date.weekday().num_days_from_monday() as u8;
        let is_weekend  = day_of_week >= 5;

        let is_holiday           = self.rng.gen::<f64>() < HOLIDAY_PROBABILITY;
        let is_exam_week         = is_exam_day(date);
        let is_librarian_present = self.rng.gen::<f64>() < LIBRARIAN_PROBABILITY;

        let total_campus_students: u32 = if is_holiday {
            self.rng.gen_range(10..=50)
        } else if is_weekend {
            self.rng.gen_range(30..=100)
        } else if is_exam_week {
            self.rng.gen_range(320..=350)
        } else {
            self.rng.gen_range(250..=330)
        };

        let library_student_count = if is_holiday && !is_librarian_present {
            // closed
            0
        } else {
            let rate  = attendance_rate(is_exam_week, is_weekend, is_librarian_present);
            let base  = (f64::from(total_campus_students) * rate) as i64;
            let noise = self.rng.gen_range(-NOISE..=NOISE);
            (base + noise).clamp(0, i64::from(total_campus_students)) as u32
        };

        Observation {
            date,
            day_of_week,
            is_holiday,
            is_exam_week,
            is_librarian_present,
            total_campus_students,
            library_student_count,
        }
    }
}

/// Exam weeks: 10th–20th of May and December.
pub fn is_exam_day(date: NaiveDate) -> bool {
    matches!(date.month(), 5 | 12) && (10..=20).contains(&date.day())
}

/// Share of campus students expected in the library.
/// Overrides run in sequence: exam week, then weekend, then the
/// librarian penalty.
fn attendance_rate(is_exam_week: bool, is_weekend: bool, is_librarian_present: bool) -> f64 {
    let mut rate = NORMAL_RATE;
    if is_exam_week {
        rate = EXAM_RATE;
    }
    if is_weekend {
        rate = WEEKEND_RATE;
    }
    if !is_librarian_present {
        rate *= 0.5;
    }
    rate
}
