// Selector module: promotion weights, availability filtering and the random draw.

pub mod availability;
pub mod draw;
pub mod promotion;

pub use availability::filter_available;
pub use draw::{os_rng, select_one, select_weighted};
pub use promotion::promote;

use crate::model::{CoreError, Restaurant, WeightedRestaurant};
use rand::CryptoRng;
use serde::Deserialize;

/// How the single restaurant is drawn from the available candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Every candidate is equally likely; the weight is reported but not used.
    #[default]
    Uniform,
    /// Candidates are drawn proportionally to their promotion weight.
    Weighted,
}

impl SelectionPolicy {
    pub fn pick<'c, R: CryptoRng>(
        &self,
        rng: &mut R,
        candidates: &'c [WeightedRestaurant],
    ) -> Result<&'c WeightedRestaurant, CoreError> {
        match self {
            SelectionPolicy::Uniform => select_one(rng, candidates),
            SelectionPolicy::Weighted => select_weighted(rng, candidates),
        }
    }
}

/// Attaches a promotion weight to every candidate, preserving order.
pub fn weigh(candidates: Vec<Restaurant>) -> Vec<WeightedRestaurant> {
    candidates.into_iter().map(WeightedRestaurant::new).collect()
}
