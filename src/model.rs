// Core structs: upstream listing records, candidates, errors
use crate::utils::null_as_default;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root of the marketplace vendor listing response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RestaurantItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aggregations: Aggregations,
}

/// A single vendor as the marketplace reports it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chain: Chain,
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub redirection_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: VendorMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minimum_delivery_fee: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minimum_delivery_time: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub minimum_order_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub main_vendor_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_delivery_available: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Aggregations {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuisines: Vec<RawCuisine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCuisine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuisineInfo {
    pub id: i64,
    pub title: String,
    pub count: u32,
    pub slug: String,
}

/// A restaurant eligible for selection. Display fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub chain: Chain,
    pub hero_image: String,
    pub address: String,
    pub distance: f64,
    pub rating: f64,
    pub review_number: u32,
    pub redirection_url: String,
    pub minimum_order_amount: f64,
    pub delivery_fee: f64,
    pub delivery_time: f64,
}

impl From<&RestaurantItem> for Restaurant {
    fn from(item: &RestaurantItem) -> Self {
        Self {
            id: item.id,
            code: item.code.clone(),
            name: item.name.clone(),
            chain: item.chain.clone(),
            hero_image: item.hero_image.clone(),
            address: item.address.clone(),
            distance: item.distance,
            rating: item.rating,
            review_number: item.review_number,
            redirection_url: item.redirection_url.clone(),
            minimum_order_amount: item.minimum_order_amount,
            delivery_fee: item.minimum_delivery_fee,
            delivery_time: item.minimum_delivery_time,
        }
    }
}

/// A candidate together with its promotion weight. The weight is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    weight: f64,
}

impl WeightedRestaurant {
    pub fn new(restaurant: Restaurant) -> Self {
        let weight = crate::selector::promote(restaurant.rating, restaurant.review_number);
        Self { restaurant, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn code(&self) -> &str {
        &self.restaurant.code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Parameters of a vendor listing query.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub location: Location,
    pub cuisines: Vec<String>,
    pub limit: Option<u32>,
}

/// Parameters of a single vendor menu query.
#[derive(Debug, Clone)]
pub struct MenuRequest {
    pub code: String,
    pub location: Location,
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("no candidates to select from")]
    EmptyInput,
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("entropy source failed: {0}")]
    Entropy(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream responded with status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("ranking api error: {0}")]
    Api(String),
    #[error("ranking service unreachable")]
    Unreachable,
    #[error("ranking answer could not be used: {0}")]
    InvalidAnswer(String),
}
