use screening_protocol::{PredictionResult, Severity, QUESTION_COUNT};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProbabilityBar {
    pub(crate) category: String,
    pub(crate) severity: Option<Severity>,
    pub(crate) ratio: f64,
    pub(crate) percent: u8,
}

impl ProbabilityBar {
    fn new(category: &str, probability: f64) -> Self {
        let ratio = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            category: category.to_string(),
            severity: Severity::parse(category),
            ratio,
            percent: (ratio * 100.0).round() as u8,
        }
    }

    pub(crate) fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// Display-ready form of a prediction, shared by every skin.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResultView {
    pub(crate) label: String,
    pub(crate) severity: Option<Severity>,
    pub(crate) confidence: String,
    pub(crate) bars: Vec<ProbabilityBar>,
    pub(crate) description: String,
    pub(crate) disclaimer: String,
    pub(crate) distribution_mismatch: bool,
}

impl ResultView {
    pub(crate) fn from_result(result: &PredictionResult) -> Self {
        let mut bars: Vec<ProbabilityBar> = result
            .probabilities
            .iter()
            .map(|(category, probability)| ProbabilityBar::new(category, *probability))
            .collect();
        // known categories in severity order, unknown ones after (map order is alphabetical)
        bars.sort_by_key(|bar| bar.severity.map_or(Severity::ALL.len(), |s| s.level() as usize));

        let distribution_mismatch = !matches_expected_categories(&bars);

        Self {
            label: result.prediction.clone(),
            severity: result.severity(),
            confidence: format_confidence(result.confidence),
            bars,
            description: result.description.clone(),
            disclaimer: result.disclaimer.clone(),
            distribution_mismatch,
        }
    }

    /// Call once per received result; the category set is an external contract.
    pub(crate) fn warn_on_mismatch(&self) {
        if self.distribution_mismatch {
            let categories: Vec<&str> = self.bars.iter().map(|bar| bar.category.as_str()).collect();
            warn!(?categories, "unexpected probability categories from service");
        }
    }
}

fn matches_expected_categories(bars: &[ProbabilityBar]) -> bool {
    bars.len() == Severity::ALL.len()
        && Severity::ALL
            .iter()
            .zip(bars)
            .all(|(expected, bar)| bar.severity == Some(*expected))
}

pub(crate) fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

pub(crate) fn progress_label(answered: usize) -> String {
    format!("{answered} / {QUESTION_COUNT} answered")
}

/// Fixed-width text bar, e.g. `[#####     ]`.
pub(crate) fn text_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}
