// ============================================================
// Layer 4 — Dataset Summary
// ============================================================
// Text-mode replacement for the usage charts: average library
// headcount per weekday and normal weeks vs exam weeks.

use crate::domain::observation::Observation;

pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq)]
pub struct UsageSummary {
    pub rows: usize,

    /// Mean library count per weekday (Mon..Sun); None if no rows
    pub mean_by_weekday: [Option<f64>; 7],

    pub mean_normal_week: Option<f64>,
    pub mean_exam_week:   Option<f64>,
}

impl UsageSummary {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut sums   = [0.0f64; 7];
        let mut counts = [0usize; 7];

        for o in observations {
            let d = usize::from(o.day_of_week.min(6));
            sums[d]   += f64::from(o.library_student_count);
            counts[d] += 1;
        }

        let mut mean_by_weekday = [None; 7];
        for d in 0..7 {
            if counts[d] > 0 {
                mean_by_weekday[d] = Some(sums[d] / counts[d] as f64);
            }
        }

        Self {
            rows: observations.len(),
            mean_by_weekday,
            mean_normal_week: mean_count(observations.iter().filter(|o| !o.is_exam_week)),
            mean_exam_week:   mean_count(observations.iter().filter(|o| o.is_exam_week)),
        }
    }
}

fn mean_count<'a>(rows: impl Iterator<Item = &'a Observation>) -> Option<f64> {
    let (sum, n) = rows.fold((0.0, 0usize), |(s, n), o| {
        (s + f64::from(o.library_student_count), n + 1)
    });
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(day_of_week: u8, exam: bool, count: u32) -> Observation {
        Observation {
            date:                  NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            day_of_week,
            is_holiday:            false,
            is_exam_week:          exam,
            is_librarian_present:  true,
            total_campus_students: 350,
            library_student_count: count,
        }
    }

    #[test]
    fn test_weekday_and_exam_means() {
        let rows = vec![obs(0, false, 90), obs(0, false, 110), obs(2, true, 270)];
        let s    = UsageSummary::from_observations(&rows);

        assert_eq!(s.rows, 3);
        assert_eq!(s.mean_by_weekday[0], Some(100.0));
        assert_eq!(s.mean_by_weekday[1], None);
        assert_eq!(s.mean_by_weekday[2], Some(270.0));
        assert_eq!(s.mean_normal_week, Some(100.0));
        assert_eq!(s.mean_exam_week, Some(270.0));
    }

    #[test]
    fn test_empty_summary() {
        let s = UsageSummary::from_observations(&[]);
        assert_eq!(s.rows, 0);
        assert!(s.mean_exam_week.is_none());
    }
}
