use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use trellis_graph::Property;

/// A transformation applied to each selected property of a selected
/// vertex. Discriminant-tagged for polymorphic payloads.
///
/// Actors are best-effort: a property whose observations an actor cannot
/// work with (e.g. non-numeric values passed to a statistic) is returned
/// unchanged, and the failure is swallowed at the actor boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Actor {
    /// Appends a `Mean` sub-property with the arithmetic mean
    Mean,
    /// Appends a `Median` sub-property with the middle value
    Median,
    /// Appends a `Variance` sub-property
    Variance {
        /// Whether to apply Bessel's correction (sample variance)
        #[serde(default)]
        bessel: bool,
    },
    /// Appends a `StandardDeviation` sub-property
    StandardDeviation {
        /// Whether to apply Bessel's correction (sample deviation)
        #[serde(default)]
        bessel: bool,
    },
    /// Rewrites string observations by regex replacement
    ReplaceText {
        /// The regular expression to search for
        pattern: String,
        /// The replacement text
        replacement: String,
    },
}

impl Actor {
    /// Transform one property. On any failure the input property is
    /// returned unchanged.
    pub fn apply(&self, property: &Property) -> Property {
        match self {
            Actor::Mean => append_statistic(property, "Mean", mean),
            Actor::Median => append_statistic(property, "Median", median),
            Actor::Variance { bessel } => {
                let bessel = *bessel;
                append_statistic(property, "Variance", move |values| variance(values, bessel))
            }
            Actor::StandardDeviation { bessel } => {
                let bessel = *bessel;
                append_statistic(property, "StandardDeviation", move |values| {
                    variance(values, bessel).map(f64::sqrt)
                })
            }
            Actor::ReplaceText {
                pattern,
                replacement,
            } => replace_text(property, pattern, replacement),
        }
    }
}

fn append_statistic(
    property: &Property,
    name: &str,
    compute: impl FnOnce(&[f64]) -> Option<f64>,
) -> Property {
    let Some(values) = property.numeric_values() else {
        return property.clone();
    };
    match compute(&values) {
        Some(statistic) => {
            property.with_subproperty(Property::with_values(name, vec![json!(statistic)]))
        }
        None => property.clone(),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[middle])
    } else {
        Some((sorted[middle - 1] + sorted[middle]) / 2.0)
    }
}

/// Population variance, or sample variance when `bessel` is set. A single
/// observation has no sample variance; that case saturates to `f64::MAX`.
fn variance(values: &[f64], bessel: bool) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let squared_deviations: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    if bessel {
        if values.len() == 1 {
            return Some(f64::MAX);
        }
        Some(squared_deviations / (count - 1.0))
    } else {
        Some(squared_deviations / count)
    }
}

fn replace_text(property: &Property, pattern: &str, replacement: &str) -> Property {
    let Ok(regex) = Regex::new(pattern) else {
        return property.clone();
    };
    let mut derived = property.clone();
    for observation in &mut derived.observations {
        if let serde_json::Value::String(text) = &observation.value {
            observation.value = json!(regex.replace_all(text, replacement).into_owned());
        }
    }
    derived
}
