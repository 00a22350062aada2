// Ranking oracle: picks a restaurant or narrows cuisine categories for a user.
//
// The oracle is opaque. `RandomRanker` stands in when no generative model is configured.

mod random;
mod response;
mod vertex;

pub use random::RandomRanker;
pub use response::collect_text;
pub use vertex::VertexRanker;

use crate::menu::SimplifiedMenu;
use crate::model::{Location, RankError, WeightedRestaurant};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub id: i64,
    pub label: String,
}

/// What the user asked for when requesting a suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub initial_preference: String,
    #[serde(default)]
    pub additional_detail: String,
    pub location: Location,
    #[serde(default)]
    pub cuisines: Vec<CategoryLabel>,
}

/// Cuisine categories the user may be interested in, with their free-text preference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[serde(default)]
    pub user_preference: String,
    pub location: Location,
    #[serde(default)]
    pub available_categories: Vec<CategoryLabel>,
}

/// A candidate offered to the oracle, with its menu when one could be fetched.
#[derive(Debug, Clone)]
pub struct RankCandidate {
    pub restaurant: WeightedRestaurant,
    pub menu: Option<SimplifiedMenu>,
}

/// The oracle's pick, identified by vendor code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suggestion {
    pub code: String,
    #[serde(default)]
    pub reason: String,
}

#[async_trait::async_trait]
pub trait Ranker: Send + Sync {
    async fn rank(
        &self,
        candidates: &[RankCandidate],
        context: &UserContext,
    ) -> Result<Suggestion, RankError>;

    async fn filter_categories(
        &self,
        request: &CategoryRequest,
    ) -> Result<Vec<CategoryLabel>, RankError>;
}
