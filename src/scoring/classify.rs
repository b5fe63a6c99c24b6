use serde::Serialize;

use crate::error::{ensure_finite, EvalResult};
use crate::standards::StandardsTable;

/// Rough points-per-grade figure used only to phrase shortfalls as
/// "about N more grades". Not derived from any event's `score_per_grade`.
pub const ESTIMATED_POINTS_PER_GRADE: f64 = 8.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    StrongPass,
    LikelyPass,
    UnlikelyPass,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::StrongPass => "Strong pass",
            Tier::LikelyPass => "Likely pass",
            Tier::UnlikelyPass => "Unlikely pass",
        }
    }
}

/// Distance from a total score to one cutoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deficit {
    pub cutoff_label: &'static str,
    pub cutoff: f64,
    /// Whether the unrounded total reaches the cutoff
    pub met: bool,
    /// Points still missing, rounded to 2 decimals for display
    pub deficit: f64,
    /// Estimated grade steps to close the gap; None when the rounded deficit is 0
    pub grades_needed: Option<u32>,
}

impl Deficit {
    fn measure(cutoff_label: &'static str, cutoff: f64, total: f64) -> Self {
        let deficit = round2((cutoff - total).max(0.0));
        let grades_needed = if deficit > 0.0 {
            Some((deficit / ESTIMATED_POINTS_PER_GRADE).ceil() as u32)
        } else {
            None
        };
        Self {
            cutoff_label,
            cutoff,
            met: total >= cutoff,
            deficit,
            grades_needed,
        }
    }

    /// Decided on the raw total; a deficit that rounds to 0.00 is still missed.
    pub fn is_satisfied(&self) -> bool {
        self.met
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub tier: Tier,
    pub total_score: f64,
    /// One entry per cutoff, highest first
    pub deficits: Vec<Deficit>,
}

/// Classify a total score against a university's own cutoffs.
///
/// Boundaries are closed-open: a total exactly on a cutoff reaches that tier.
pub fn classify(table: &StandardsTable, university: &str, total_score: f64) -> EvalResult<Classification> {
    let total_score = ensure_finite("total score", total_score)?;
    let uni = table.university(university)?;

    let tier = if total_score >= uni.pass_excellent_cutoff {
        Tier::StrongPass
    } else if total_score >= uni.pass_good_cutoff {
        Tier::LikelyPass
    } else {
        Tier::UnlikelyPass
    };

    let deficits = vec![
        Deficit::measure("pass_excellent", uni.pass_excellent_cutoff, total_score),
        Deficit::measure("pass_good", uni.pass_good_cutoff, total_score),
    ];

    tracing::debug!(
        university = %uni.id,
        total_score,
        ?tier,
        "classified total score"
    );

    Ok(Classification {
        tier,
        total_score,
        deficits,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
