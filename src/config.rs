use anyhow::Context;
use tracing::{debug, warn};

use crate::models::Weights;

pub const WEIGHTS_ENV: &str = "GRADEBOOK_WEIGHTS";

/// participation, readings, labs, exercises, projects, midterm, final
pub const DEFAULT_WEIGHTS: [f64; 7] = [0.05, 0.05, 0.15, 0.09, 0.21, 0.2, 0.25];

/// Picks the course weights: an explicit flag wins over the
/// environment, which wins over the defaults.
pub fn resolve_weights(flag: Option<&str>, env: Option<&str>) -> anyhow::Result<Weights> {
    let weights = match (flag, env) {
        (Some(value), _) => value
            .parse::<Weights>()
            .with_context(|| format!("invalid --weights `{value}`"))?,
        (None, Some(value)) => value
            .parse::<Weights>()
            .with_context(|| format!("invalid {WEIGHTS_ENV} `{value}`"))?,
        (None, None) => Weights::from(DEFAULT_WEIGHTS),
    };

    let sum = weights.sum();
    if (sum - 1.0).abs() > 1e-6 {
        warn!(sum, "course weights do not sum to 1; totals will not be on a 0-100 scale");
    }
    debug!(weights = ?weights.as_array(), "resolved course weights");
    Ok(weights)
}

/// Reads the weights override from the process environment.
pub fn weights_from_env() -> Option<String> {
    std::env::var(WEIGHTS_ENV).ok()
}
