use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Qualitative categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    VeryPoor,
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl Band {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryPoor => "very-poor",
            Self::Poor => "poor",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryPoor => "Very Poor",
            Self::Poor => "Poor",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which built-in ladder to use when the config defines no `[[bands]]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LadderPreset {
    #[default]
    FiveBand,
    ThreeBand,
}

/// One row of the classification table. `upper_bound` is inclusive; the last
/// row has none and catches every higher score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<u32>,
    pub band: Band,
    pub message: String,
    pub advice: Vec<String>,
}

impl BandRow {
    fn new(upper_bound: Option<u32>, band: Band, message: &str, advice: &[&str]) -> Self {
        Self {
            upper_bound,
            band,
            message: message.to_string(),
            advice: advice.iter().map(|line| line.to_string()).collect(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    #[error("band ladder has no rows")]
    Empty,

    #[error("band {band} needs an upper_bound (only the last band may omit it)")]
    MissingUpperBound { band: Band },

    #[error("last band {band} must not set an upper_bound; it covers every higher score")]
    BoundedLastBand { band: Band },

    #[error("upper_bound of band {band} must be below {}; leave it out on the last band instead", u32::MAX)]
    BoundTooLarge { band: Band },

    #[error("upper_bound {upper} of band {band} must be greater than {previous}")]
    BoundsNotAscending {
        band: Band,
        upper: u32,
        previous: u32,
    },

    #[error("band {band} must come after {previous} and appear once")]
    BandsNotAscending { band: Band, previous: Band },

    #[error("band {band} has no advice")]
    EmptyAdvice { band: Band },
}

/// Inclusive score interval a band covers, as far as the ladder constrains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandInterval {
    pub band: Band,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
}

impl BandInterval {
    /// True when no score in `min..=max` lands in this interval.
    pub fn is_empty_within(&self, min: u32, max: u32) -> bool {
        let low = self.from.unwrap_or(0).max(min);
        let high = self.to.unwrap_or(u32::MAX).min(max);
        low > high
    }
}

/// Validated, ascending classification table. Every score maps to exactly one
/// row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    rows: Vec<BandRow>,
}

static FIVE_BAND: Lazy<Ladder> = Lazy::new(|| {
    Ladder::new(vec![
        BandRow::new(
            Some(20),
            Band::VeryPoor,
            "Your well-being score indicates very poor well-being. Please reach out to a healthcare professional as soon as you can for personalized support.",
            &[
                "Contact your doctor or a mental health professional and share this result.",
                "Tell someone you trust how you have been feeling.",
                "If you are in crisis, call your local emergency number or a crisis line right away.",
            ],
        ),
        BandRow::new(
            Some(50),
            Band::Poor,
            "Your well-being score indicates poor well-being. We recommend consulting with a healthcare professional for personalized advice and support.",
            &[
                "Book an appointment with a healthcare professional.",
                "Keep a regular sleep schedule and limit alcohol and caffeine.",
                "Plan one small activity each day that you used to enjoy.",
                "Stay in touch with friends or family, even briefly.",
            ],
        ),
        BandRow::new(
            Some(75),
            Band::Moderate,
            "Your well-being score indicates moderate well-being. Focus on self-care activities such as exercise, relaxation techniques, and social connections.",
            &[
                "Aim for at least 30 minutes of physical activity most days.",
                "Try a relaxation technique such as breathing exercises or meditation.",
                "Make time for social connections every week.",
                "Check in with yourself again in two weeks.",
            ],
        ),
        BandRow::new(
            Some(95),
            Band::Good,
            "Your well-being score indicates good well-being. Keep up the good work and continue practicing healthy habits for maintaining well-being.",
            &[
                "Keep the routines that are working for you.",
                "Protect your sleep and your time for rest.",
                "Notice early signs of stress and act on them.",
            ],
        ),
        BandRow::new(
            None,
            Band::Excellent,
            "Your well-being score indicates excellent well-being. You are thriving; keep nurturing the habits and relationships that support you.",
            &[
                "Continue your healthy habits and stay active.",
                "Share what works for you with people around you.",
                "Retake the questionnaire from time to time to stay aware of changes.",
            ],
        ),
    ])
    .expect("valid five-band ladder")
});

static THREE_BAND: Lazy<Ladder> = Lazy::new(|| {
    Ladder::new(vec![
        BandRow::new(
            Some(50),
            Band::Poor,
            "Your well-being score indicates poor well-being. We recommend consulting with a healthcare professional for personalized advice and support.",
            &[
                "Book an appointment with a healthcare professional.",
                "Stay in touch with friends or family, even briefly.",
            ],
        ),
        BandRow::new(
            Some(75),
            Band::Moderate,
            "Your well-being score indicates moderate well-being. Focus on self-care activities such as exercise, relaxation techniques, and social connections.",
            &[
                "Aim for at least 30 minutes of physical activity most days.",
                "Try a relaxation technique such as breathing exercises or meditation.",
                "Make time for social connections every week.",
            ],
        ),
        BandRow::new(
            None,
            Band::Good,
            "Your well-being score indicates good well-being. Keep up the good work and continue practicing healthy habits for maintaining well-being.",
            &[
                "Keep the routines that are working for you.",
                "Protect your sleep and your time for rest.",
            ],
        ),
    ])
    .expect("valid three-band ladder")
});

impl Ladder {
    pub fn new(rows: Vec<BandRow>) -> Result<Self, LadderError> {
        let Some((last, bounded)) = rows.split_last() else {
            return Err(LadderError::Empty);
        };

        if last.upper_bound.is_some() {
            return Err(LadderError::BoundedLastBand { band: last.band });
        }

        let mut previous: Option<(u32, Band)> = None;
        for row in bounded {
            let Some(upper) = row.upper_bound else {
                return Err(LadderError::MissingUpperBound { band: row.band });
            };
            if upper == u32::MAX {
                return Err(LadderError::BoundTooLarge { band: row.band });
            }
            if let Some((previous_upper, previous_band)) = previous {
                if upper <= previous_upper {
                    return Err(LadderError::BoundsNotAscending {
                        band: row.band,
                        upper,
                        previous: previous_upper,
                    });
                }
                if row.band <= previous_band {
                    return Err(LadderError::BandsNotAscending {
                        band: row.band,
                        previous: previous_band,
                    });
                }
            }
            previous = Some((upper, row.band));
        }

        if let Some((_, previous_band)) = previous
            && last.band <= previous_band
        {
            return Err(LadderError::BandsNotAscending {
                band: last.band,
                previous: previous_band,
            });
        }

        if let Some(row) = rows.iter().find(|row| row.advice.is_empty()) {
            return Err(LadderError::EmptyAdvice { band: row.band });
        }

        Ok(Self { rows })
    }

    pub fn preset(preset: LadderPreset) -> Self {
        match preset {
            LadderPreset::FiveBand => FIVE_BAND.clone(),
            LadderPreset::ThreeBand => THREE_BAND.clone(),
        }
    }

    pub fn rows(&self) -> &[BandRow] {
        &self.rows
    }

    /// Row for `score` under the inclusive-upper-bound rule.
    pub fn lookup(&self, score: u32) -> &BandRow {
        let last = self.rows.len() - 1;
        self.rows[..last]
            .iter()
            .find(|row| row.upper_bound.is_some_and(|upper| score <= upper))
            .unwrap_or(&self.rows[last])
    }

    pub fn row(&self, band: Band) -> Option<&BandRow> {
        self.rows.iter().find(|row| row.band == band)
    }

    pub fn intervals(&self) -> Vec<BandInterval> {
        let mut from = None;
        self.rows
            .iter()
            .map(|row| {
                let interval = BandInterval {
                    band: row.band,
                    from,
                    to: row.upper_bound,
                };
                from = row.upper_bound.map(|upper| upper.saturating_add(1));
                interval
            })
            .collect()
    }

    /// Bands no achievable score can reach.
    pub fn unreachable_bands(&self, min: u32, max: u32) -> Vec<Band> {
        self.intervals()
            .into_iter()
            .filter(|interval| interval.is_empty_within(min, max))
            .map(|interval| interval.band)
            .collect()
    }
}

impl Default for Ladder {
    fn default() -> Self {
        Self::preset(LadderPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(upper_bound: Option<u32>, band: Band) -> BandRow {
        BandRow::new(upper_bound, band, "message", &["advice"])
    }

    #[test]
    fn presets_are_valid() {
        assert_eq!(Ladder::preset(LadderPreset::FiveBand).rows().len(), 5);
        assert_eq!(Ladder::preset(LadderPreset::ThreeBand).rows().len(), 3);
    }

    #[test]
    fn threshold_scores_fall_in_the_lower_band() {
        let ladder = Ladder::default();
        assert_eq!(ladder.lookup(20).band, Band::VeryPoor);
        assert_eq!(ladder.lookup(21).band, Band::Poor);
        assert_eq!(ladder.lookup(50).band, Band::Poor);
        assert_eq!(ladder.lookup(75).band, Band::Moderate);
        assert_eq!(ladder.lookup(76).band, Band::Good);
        assert_eq!(ladder.lookup(95).band, Band::Good);
        assert_eq!(ladder.lookup(96).band, Band::Excellent);
    }

    #[test]
    fn every_score_maps_to_one_contiguous_band() {
        let ladder = Ladder::default();
        let mut previous = ladder.lookup(0).band;
        for score in 1..=100 {
            let band = ladder.lookup(score).band;
            assert!(band >= previous, "band went backwards at {score}");
            previous = band;
        }
        assert_eq!(previous, Band::Excellent);
    }

    #[test]
    fn three_band_ladder_boundaries() {
        let ladder = Ladder::preset(LadderPreset::ThreeBand);
        assert_eq!(ladder.lookup(0).band, Band::Poor);
        assert_eq!(ladder.lookup(50).band, Band::Poor);
        assert_eq!(ladder.lookup(51).band, Band::Moderate);
        assert_eq!(ladder.lookup(76).band, Band::Good);
    }

    #[test]
    fn intervals_are_contiguous() {
        let intervals = Ladder::default().intervals();
        assert_eq!(intervals[0].from, None);
        assert_eq!(intervals[0].to, Some(20));
        for pair in intervals.windows(2) {
            assert_eq!(pair[1].from, pair[0].to.map(|to| to + 1));
        }
        assert_eq!(intervals[4].to, None);
    }

    #[test]
    fn rejects_empty_ladder() {
        assert_eq!(Ladder::new(Vec::new()), Err(LadderError::Empty));
    }

    #[test]
    fn rejects_bounded_last_row_and_unbounded_middle_row() {
        let err = Ladder::new(vec![row(Some(50), Band::Poor), row(Some(100), Band::Good)]);
        assert_eq!(err, Err(LadderError::BoundedLastBand { band: Band::Good }));

        let err = Ladder::new(vec![
            row(None, Band::Poor),
            row(Some(75), Band::Moderate),
            row(None, Band::Good),
        ]);
        assert_eq!(err, Err(LadderError::MissingUpperBound { band: Band::Poor }));
    }

    #[test]
    fn rejects_descending_bounds_and_bands() {
        let err = Ladder::new(vec![
            row(Some(50), Band::Poor),
            row(Some(50), Band::Moderate),
            row(None, Band::Good),
        ]);
        assert!(matches!(err, Err(LadderError::BoundsNotAscending { .. })));

        let err = Ladder::new(vec![row(Some(50), Band::Good), row(None, Band::Poor)]);
        assert!(matches!(err, Err(LadderError::BandsNotAscending { .. })));
    }

    #[test]
    fn rejects_bound_at_the_top_of_the_score_type() {
        let err = Ladder::new(vec![row(Some(u32::MAX), Band::Poor), row(None, Band::Good)]);
        assert_eq!(err, Err(LadderError::BoundTooLarge { band: Band::Poor }));

        let ladder = Ladder::new(vec![row(Some(u32::MAX - 1), Band::Poor), row(None, Band::Good)])
            .unwrap();
        assert_eq!(ladder.intervals()[1].from, Some(u32::MAX));
        assert_eq!(ladder.unreachable_bands(0, 100), vec![Band::Good]);
    }

    #[test]
    fn rejects_missing_advice() {
        let mut rows = vec![row(Some(50), Band::Poor), row(None, Band::Good)];
        rows[1].advice.clear();
        assert_eq!(
            Ladder::new(rows),
            Err(LadderError::EmptyAdvice { band: Band::Good })
        );
    }

    #[test]
    fn reports_bands_outside_the_achievable_range() {
        let ladder = Ladder::default();
        assert!(ladder.unreachable_bands(0, 100).is_empty());
        assert_eq!(ladder.unreachable_bands(20, 100), Vec::<Band>::new());
        assert_eq!(ladder.unreachable_bands(21, 100), vec![Band::VeryPoor]);
        assert_eq!(ladder.unreachable_bands(0, 50), vec![Band::Moderate, Band::Good, Band::Excellent]);
    }
}
