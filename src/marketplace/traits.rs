use crate::model::{FetchError, ListingRequest, MenuRequest};

/// Raw access to the delivery marketplace. Implementations return response bodies undecoded.
#[async_trait::async_trait]
pub trait Marketplace: Send + Sync {
    async fn fetch_listing(&self, req: &ListingRequest) -> Result<String, FetchError>;
    async fn fetch_menu(&self, req: &MenuRequest) -> Result<String, FetchError>;
}
