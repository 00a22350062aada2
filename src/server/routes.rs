use crate::cuisine::to_cuisine_info;
use crate::menu::SimplifiedMenu;
use crate::model::{CoreError, CuisineInfo, ListingRequest, Location, MenuRequest, WeightedRestaurant};
use crate::normalizer::normalize;
use crate::parser::{parse_listing, parse_menu};
use crate::ranker::{CategoryLabel, CategoryRequest, RankCandidate, UserContext};
use crate::selector::{filter_available, os_rng, weigh};
use crate::server::{ApiError, AppState};

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct PickerQuery {
    latitude: Option<String>,
    longitude: Option<String>,
    #[serde(rename = "cuisineTypes")]
    cuisine_types: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    code: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    message: &'static str,
    status: u16,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RandomResponse {
    restaurants: Vec<WeightedRestaurant>,
}

#[derive(Debug, Serialize)]
pub struct CuisinesResponse {
    cuisines: Vec<CuisineInfo>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    restaurant: WeightedRestaurant,
    reason: String,
}

fn parse_location(latitude: Option<&str>, longitude: Option<&str>) -> Result<Location, ApiError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(ApiError::BadRequest(
            "Missing latitude or longitude parameters".into(),
        ));
    };
    let latitude = latitude
        .trim()
        .parse::<f64>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid latitude value: {e}")))?;
    let longitude = longitude
        .trim()
        .parse::<f64>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid longitude value: {e}")))?;
    Ok(Location { latitude, longitude })
}

fn split_cuisines(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Fetches the listing and returns the vendors that deliver, with their promotion weight.
async fn available_candidates(
    state: &AppState,
    req: &ListingRequest,
) -> Result<Vec<WeightedRestaurant>, ApiError> {
    let body = state.marketplace.fetch_listing(req).await?;
    let listing = parse_listing(&body)?;
    let candidates = weigh(filter_available(&listing.data.items));
    info!(
        "Listing returned {} vendors, {} deliver",
        listing.data.items.len(),
        candidates.len()
    );
    Ok(candidates)
}

/// Menu for one vendor, or `None` when it cannot be fetched or decoded.
async fn simplified_menu(state: &AppState, code: &str, location: &Location) -> Option<SimplifiedMenu> {
    let req = MenuRequest {
        code: code.to_string(),
        location: location.clone(),
    };
    let body = match state.marketplace.fetch_menu(&req).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Menu fetch failed for {}: {}", code, e);
            return None;
        }
    };
    match parse_menu(&body) {
        Ok(doc) => Some(normalize(&doc)),
        Err(e) => {
            warn!("Menu for {} skipped: {}", code, e);
            None
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Service is healthy",
        status: 200,
        started_at: state.started_at,
    })
}

pub async fn random_restaurant(
    State(state): State<AppState>,
    Query(query): Query<PickerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let location = parse_location(query.latitude.as_deref(), query.longitude.as_deref())?;
    let req = ListingRequest {
        location,
        cuisines: split_cuisines(query.cuisine_types.as_deref()),
        limit: None,
    };

    let candidates = available_candidates(&state, &req).await?;
    let picked = state.policy.pick(&mut os_rng()?, &candidates)?.clone();
    info!(
        "Picked {} ({}) out of {} candidates",
        picked.restaurant.name,
        picked.code(),
        candidates.len()
    );

    Ok((
        [(CACHE_CONTROL, "no-cache, no-store, must-revalidate")],
        Json(RandomResponse {
            restaurants: vec![picked],
        }),
    ))
}

pub async fn restaurant_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<SimplifiedMenu>, ApiError> {
    let location = parse_location(query.latitude.as_deref(), query.longitude.as_deref())?;
    let code = query
        .code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing restaurant code".into()))?;

    let body = state.marketplace.fetch_menu(&MenuRequest { code, location }).await?;
    let doc = parse_menu(&body)?;
    Ok(Json(normalize(&doc)))
}

pub async fn cuisines(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<CuisinesResponse>, ApiError> {
    let location = parse_location(query.latitude.as_deref(), query.longitude.as_deref())?;
    // Only the aggregation matters, so one vendor is enough.
    let req = ListingRequest {
        location,
        cuisines: Vec::new(),
        limit: Some(1),
    };
    let body = state.marketplace.fetch_listing(&req).await?;
    let listing = parse_listing(&body)?;
    Ok(Json(CuisinesResponse {
        cuisines: to_cuisine_info(&listing.data.aggregations),
    }))
}

pub async fn filter_categories(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<Vec<CategoryLabel>>, ApiError> {
    let selected = state.ranker.filter_categories(&request).await?;
    info!(
        "Kept {} of {} categories",
        selected.len(),
        request.available_categories.len()
    );
    Ok(Json(selected))
}

pub async fn suggestion(
    State(state): State<AppState>,
    Json(context): Json<UserContext>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let req = ListingRequest {
        location: context.location.clone(),
        cuisines: context.cuisines.iter().map(|c| c.id.to_string()).collect(),
        limit: None,
    };
    let mut candidates = available_candidates(&state, &req).await?;
    if candidates.is_empty() {
        return Err(CoreError::EmptyInput.into());
    }
    candidates.truncate(state.max_menus.max(1));

    let menus = join_all(
        candidates
            .iter()
            .map(|candidate| simplified_menu(&state, candidate.code(), &context.location)),
    )
    .await;
    let ranked: Vec<RankCandidate> = candidates
        .into_iter()
        .zip(menus)
        .map(|(restaurant, menu)| RankCandidate { restaurant, menu })
        .collect();

    let suggestion = state.ranker.rank(&ranked, &context).await?;
    let matched = ranked
        .into_iter()
        .find(|candidate| candidate.restaurant.code() == suggestion.code)
        .ok_or_else(|| {
            ApiError::NotFound(format!("No restaurant matches the code: {}", suggestion.code))
        })?;
    info!("Suggested {}: {}", suggestion.code, suggestion.reason);

    Ok(Json(SuggestionResponse {
        restaurant: matched.restaurant,
        reason: suggestion.reason,
    }))
}
