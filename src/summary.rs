//! Marks summary shown on a result sheet

use crate::models::Subject;

/// Totals over a subjects table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarksSummary {
    pub obtained: f64,
    pub max: f64,
}

impl MarksSummary {
    pub fn from_subjects(subjects: &[Subject]) -> Self {
        subjects.iter().fold(Self::default(), |acc, s| Self {
            obtained: acc.obtained + s.obtained_marks,
            max: acc.max + s.max_marks,
        })
    }

    /// Percentage rounded to two decimals, `None` when there are no max marks
    pub fn percentage(&self) -> Option<f64> {
        if self.max <= 0.0 {
            return None;
        }
        Some((self.obtained / self.max * 10_000.0).round() / 100.0)
    }

    /// `"81.25%"`, or `"0%"` when there are no max marks
    pub fn percentage_label(&self) -> String {
        match self.percentage() {
            Some(pct) => format!("{:.2}%", pct),
            None => "0%".to_string(),
        }
    }
}

/// Percentage label for a subjects table
pub fn percentage_label(subjects: &[Subject]) -> String {
    MarksSummary::from_subjects(subjects).percentage_label()
}
