//! Score bands for the 0–10 clause risk scale.
//!
//! A [`Rubric`] is an ordered table of integer bands. Construction checks that
//! the bands are contiguous, non-overlapping and together cover the whole scale,
//! so every normalized score maps to exactly one description.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest point of the risk scale.
pub const SCORE_MIN: u8 = 0;
/// Highest point of the risk scale.
pub const SCORE_MAX: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RubricError {
    #[error("rubric has no bands")]
    Empty,

    #[error("band {index} is inverted ({low}..={high})")]
    Inverted { index: usize, low: u8, high: u8 },

    #[error("first band starts at {0}, expected {SCORE_MIN}")]
    BadStart(u8),

    #[error("last band ends at {0}, expected {SCORE_MAX}")]
    BadEnd(u8),

    #[error("band {index} ends at {prev_high} but the next band starts at {next_low}")]
    NotContiguous {
        index: usize,
        prev_high: u8,
        next_low: u8,
    },
}

/// One inclusive score range and what it means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricBand {
    pub low: u8,
    pub high: u8,
    pub description: String,
}

impl RubricBand {
    pub fn new(low: u8, high: u8, description: impl Into<String>) -> Self {
        Self {
            low,
            high,
            description: description.into(),
        }
    }

    pub fn contains(&self, score: u8) -> bool {
        self.low <= score && score <= self.high
    }
}

/// Validated, ordered set of bands spanning `SCORE_MIN..=SCORE_MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RubricBand>", into = "Vec<RubricBand>")]
pub struct Rubric {
    bands: Vec<RubricBand>,
}

impl Rubric {
    pub fn new(bands: Vec<RubricBand>) -> Result<Self, RubricError> {
        let first = bands.first().ok_or(RubricError::Empty)?;
        if first.low != SCORE_MIN {
            return Err(RubricError::BadStart(first.low));
        }

        for (index, band) in bands.iter().enumerate() {
            if band.low > band.high {
                return Err(RubricError::Inverted {
                    index,
                    low: band.low,
                    high: band.high,
                });
            }
        }

        for (index, pair) in bands.windows(2).enumerate() {
            if pair[1].low != pair[0].high.saturating_add(1) || pair[0].high == u8::MAX {
                return Err(RubricError::NotContiguous {
                    index,
                    prev_high: pair[0].high,
                    next_low: pair[1].low,
                });
            }
        }

        // Non-empty was checked above.
        let last_high = bands.last().map_or(SCORE_MIN, |b| b.high);
        if last_high != SCORE_MAX {
            return Err(RubricError::BadEnd(last_high));
        }

        Ok(Self { bands })
    }

    /// Four-band table used to grade employment-contract clauses.
    pub fn toxicity() -> Self {
        Self {
            bands: vec![
                RubricBand::new(0, 2, "완벽하게 공정하고 법적인 문제가 전혀 없는 조항."),
                RubricBand::new(
                    3,
                    5,
                    "법적 효력은 있으나 근로자에게 다소 불리하거나 모호한 표현이 있음.",
                ),
                RubricBand::new(
                    6,
                    8,
                    "근로기준법 위반 소지가 높거나, 근로자에게 부당한 의무를 부과함.",
                ),
                RubricBand::new(
                    9,
                    10,
                    "명백한 불법(위약 예정, 퇴직금 포기 등)이며 절대 용납될 수 없는 독소조항.",
                ),
            ],
        }
    }

    pub fn bands(&self) -> &[RubricBand] {
        &self.bands
    }

    /// Band containing `score`, after rounding to the nearest integer and
    /// clamping to the scale.
    pub fn band_for(&self, score: f64) -> Option<&RubricBand> {
        let point = score.round().clamp(f64::from(SCORE_MIN), f64::from(SCORE_MAX)) as u8;
        self.bands.iter().find(|b| b.contains(point))
    }

    /// One line per band, for inclusion in a scoring prompt.
    pub fn render(&self) -> String {
        self.bands
            .iter()
            .map(|b| format!("- {}~{}점: {}", b.low, b.high, b.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::toxicity()
    }
}

impl TryFrom<Vec<RubricBand>> for Rubric {
    type Error = RubricError;

    fn try_from(bands: Vec<RubricBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<Rubric> for Vec<RubricBand> {
    fn from(rubric: Rubric) -> Self {
        rubric.bands
    }
}
