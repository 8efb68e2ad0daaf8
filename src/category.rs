use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Category {
    pub label: String,
    /// Inclusive upper bound of the bucket
    pub upper: f64,
}

/// A fixed partition of the output universe into labelled buckets.
///
/// The first bucket is closed on both ends; every later bucket is
/// `(previous upper, upper]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Categories(Vec<Category>);

impl Categories {
    pub fn new<L: Into<String>>(buckets: impl IntoIterator<Item = (L, f64)>) -> Result<Self, ConfigError> {
        let buckets: Vec<_> = buckets
            .into_iter()
            .map(|(label, upper)| Category {
                label: label.into(),
                upper,
            })
            .collect();

        Self::from_vec(buckets)
    }

    pub(crate) fn from_vec(buckets: Vec<Category>) -> Result<Self, ConfigError> {
        if buckets.is_empty() {
            return Err(ConfigError::InvalidCategories {
                reason: "at least one bucket is required".into(),
            });
        }
        if let Some(bucket) = buckets.iter().find(|b| !b.upper.is_finite()) {
            return Err(ConfigError::InvalidCategories {
                reason: format!("bucket `{}` has a non-finite bound", bucket.label),
            });
        }
        if let Some(pair) = buckets.windows(2).find(|w| w[0].upper >= w[1].upper) {
            return Err(ConfigError::InvalidCategories {
                reason: format!(
                    "bound of `{}` ({}) must exceed bound of `{}` ({})",
                    pair[1].label, pair[1].upper, pair[0].label, pair[0].upper
                ),
            });
        }

        Ok(Self(buckets))
    }

    /// Scores past the last bound land in the last bucket.
    pub fn categorize(&self, score: f64) -> &str {
        self.0
            .iter()
            .find(|bucket| score <= bucket.upper)
            .or(self.0.last())
            .map_or("", |bucket| bucket.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }
}
