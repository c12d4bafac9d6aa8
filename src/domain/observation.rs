// ============================================================
// Layer 3 — Observation Domain Type
// ============================================================
// One row of the dataset: the calendar/context features of a
// single day and the number of students counted in the library.
//
// Invariant: library_student_count <= total_campus_students.
// The generator enforces it by clamping; nothing downstream
// re-checks it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound of the campus population.
pub const MAX_CAMPUS_STUDENTS: u32 = 350;

/// Number of model inputs in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 5;

/// A single day of library usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date — unique per row and the ordering key
    pub date: NaiveDate,

    /// 0 = Monday … 6 = Sunday
    pub day_of_week: u8,

    pub is_holiday:           bool,
    pub is_exam_week:         bool,
    pub is_librarian_present: bool,

    /// Students on campus that day, in [0, 350]
    pub total_campus_students: u32,

    /// Target label, in [0, total_campus_students]
    pub library_student_count: u32,
}

impl Observation {
    /// Saturday and Sunday
    pub fn is_weekend(&self) -> bool {
        self.day_of_week >= 5
    }

    /// The five model inputs of this row (date and label excluded).
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            day_of_week:           self.day_of_week,
            is_holiday:            self.is_holiday,
            is_exam_week:          self.is_exam_week,
            is_librarian_present:  self.is_librarian_present,
            total_campus_students: self.total_campus_students,
        }
    }
}

/// The inputs a model sees, used both at training and at prediction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub day_of_week:           u8,
    pub is_holiday:            bool,
    pub is_exam_week:          bool,
    pub is_librarian_present:  bool,
    pub total_campus_students: u32,
}

impl FeatureVector {
    /// Numeric encoding: day of week, holiday, exam week, librarian,
    /// campus students.
    /// Booleans become 0.0 / 1.0.
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.day_of_week),
            flag(self.is_holiday),
            flag(self.is_exam_week),
            flag(self.is_librarian_present),
            f64::from(self.total_campus_students),
        ]
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
