use crate::model::RankError;
use crate::ranker::{CategoryLabel, CategoryRequest, RankCandidate, Ranker, Suggestion, UserContext};
use crate::selector::{os_rng, select_one};

/// Fair random pick; keeps every category.
pub struct RandomRanker;

impl RandomRanker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Ranker for RandomRanker {
    async fn rank(
        &self,
        candidates: &[RankCandidate],
        _context: &UserContext,
    ) -> Result<Suggestion, RankError> {
        let mut rng = os_rng().map_err(|e| RankError::Api(e.to_string()))?;
        let picked = select_one(&mut rng, candidates)
            .map_err(|e| RankError::InvalidAnswer(e.to_string()))?;
        Ok(Suggestion {
            code: picked.restaurant.code().to_string(),
            reason: format!("Picked at random from {} nearby restaurants", candidates.len()),
        })
    }

    async fn filter_categories(
        &self,
        request: &CategoryRequest,
    ) -> Result<Vec<CategoryLabel>, RankError> {
        Ok(request.available_categories.clone())
    }
}
