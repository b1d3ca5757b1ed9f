//! Transparency score sanity check.
//!
//! Each flagged clause should cost roughly ten transparency points. The
//! check compares the declared score against `100 - 10 * red_flags` and
//! buckets the distance. It catches records like a score of 90 with eight
//! flagged clauses; it does not recompute the "right" score.

use serde::{Deserialize, Serialize};

const POINTS_PER_RED_FLAG: usize = 10;
const POOR_DIFFERENCE: f64 = 30.0;
const FAIR_DIFFERENCE: f64 = 15.0;

/// How well a declared score matches the red flag count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreAlignment {
    Good,
    Fair,
    Poor,
}

impl ScoreAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for ScoreAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one alignment check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentCheck {
    pub expected: f64,
    pub difference: f64,
    pub verdict: ScoreAlignment,
}

/// Score implied by the red flag count: `max(0, 100 - 10 * red_flags)`.
pub fn expected_score(red_flags: usize) -> f64 {
    100usize.saturating_sub(red_flags.saturating_mul(POINTS_PER_RED_FLAG)) as f64
}

/// Bucket a score difference: >30 `Poor`, >15 `Fair`, else `Good`.
/// A NaN difference is `Poor`.
pub fn verdict_for(difference: f64) -> ScoreAlignment {
    if difference.is_nan() || difference > POOR_DIFFERENCE {
        ScoreAlignment::Poor
    } else if difference > FAIR_DIFFERENCE {
        ScoreAlignment::Fair
    } else {
        ScoreAlignment::Good
    }
}

/// Compare a declared transparency score with the red flag count.
pub fn check(transparency_score: f64, red_flags: usize) -> AlignmentCheck {
    let expected = expected_score(red_flags);
    let difference = (transparency_score - expected).abs();
    AlignmentCheck {
        expected,
        difference,
        verdict: verdict_for(difference),
    }
}
