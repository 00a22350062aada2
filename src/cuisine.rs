use crate::model::{Aggregations, CuisineInfo};

/// Projects the listing's cuisine aggregation into the public cuisine records.
pub fn to_cuisine_info(aggregation: &Aggregations) -> Vec<CuisineInfo> {
    aggregation
        .cuisines
        .iter()
        .map(|cuisine| CuisineInfo {
            id: cuisine.id,
            title: cuisine.title.clone(),
            count: cuisine.count,
            slug: cuisine.slug.clone(),
        })
        .collect()
}
