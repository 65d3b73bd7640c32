use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use rust_bert::pipelines::sequence_classification::{
    SequenceClassificationConfig, SequenceClassificationModel,
};
use tracing::{info, warn};

/// Upper bound on whitespace tokens handed to the model.
///
/// Matches the model's 512 subword window; text past this point cannot
/// influence the score.
pub const MAX_INPUT_TOKENS: usize = 512;

/// Reported when no score could be computed.
pub const CONFIDENCE_SENTINEL: f64 = 0.0;

/// A sequence classifier that reports its most probable class.
pub trait SequenceClassifier: Send + Sync {
    /// Maximum softmax probability over the output classes for `text`.
    fn top_probability(&self, text: &str) -> Result<f64>;
}

/// Pretrained rust-bert sequence classifier running on CPU.
pub struct BertClassifier {
    model: Arc<Mutex<SequenceClassificationModel>>,
}

impl std::fmt::Debug for BertClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertClassifier")
            .field("model", &"<SequenceClassificationModel>")
            .finish()
    }
}

impl BertClassifier {
    /// Load the default pretrained checkpoint.
    /// The first run downloads the weights.
    pub fn new() -> Result<Self> {
        info!("Loading sequence classification model");
        // Model construction blocks and must not run on an async worker.
        let model = std::thread::spawn(|| {
            SequenceClassificationModel::new(SequenceClassificationConfig::default())
        })
        .join()
        .map_err(|_| anyhow!("Failed to join model creation thread"))?
        .context("Failed to create sequence classification model")?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl SequenceClassifier for BertClassifier {
    fn top_probability(&self, text: &str) -> Result<f64> {
        let model = self
            .model
            .lock()
            .map_err(|_| anyhow!("Classification model lock poisoned"))?;

        // libtorch reports some failures by panicking.
        let labels = catch_unwind(AssertUnwindSafe(|| model.predict([text])))
            .map_err(|_| anyhow!("Classification model panicked during inference"))?;

        labels
            .first()
            .map(|label| label.score)
            .ok_or_else(|| anyhow!("Classification model returned no label"))
    }
}

/// Turns a classifier into the confidence signal attached to every diagnosis.
///
/// Errors never escape: they are logged and replaced by [`CONFIDENCE_SENTINEL`].
#[derive(Clone)]
pub struct ConfidenceScorer {
    classifier: Option<Arc<dyn SequenceClassifier>>,
}

impl std::fmt::Debug for ConfidenceScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfidenceScorer")
            .field("enabled", &self.classifier.is_some())
            .finish()
    }
}

impl ConfidenceScorer {
    pub fn new(classifier: Arc<dyn SequenceClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// Scorer without a model; every score is the sentinel.
    pub fn disabled() -> Self {
        Self { classifier: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn score(&self, context: &str) -> f64 {
        let Some(classifier) = &self.classifier else {
            return CONFIDENCE_SENTINEL;
        };

        match classifier.top_probability(clip_to_token_budget(context, MAX_INPUT_TOKENS)) {
            Ok(score) if score.is_finite() => score.clamp(0.0, 1.0),
            Ok(score) => {
                warn!(score, "Classifier returned a non-finite score");
                CONFIDENCE_SENTINEL
            }
            Err(e) => {
                warn!(error = %e, "Confidence inference failed, using sentinel");
                CONFIDENCE_SENTINEL
            }
        }
    }

    /// Score rendered the way diagnoses carry it.
    pub fn confidence(&self, context: &str) -> String {
        format_confidence(self.score(context))
    }
}

pub fn format_confidence(score: f64) -> String {
    format!("{score:.2}")
}

/// Prefix of `text` holding at most `max_tokens` whitespace-delimited tokens.
pub fn clip_to_token_budget(text: &str, max_tokens: usize) -> &str {
    let mut seen = 0;
    let mut in_token = false;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            in_token = false;
            continue;
        }
        if !in_token {
            if seen == max_tokens {
                return text[..idx].trim_end();
            }
            seen += 1;
            in_token = true;
        }
    }
    text
}
