use crate::config::MarketplaceConfig;
use crate::marketplace::Marketplace;
use crate::model::{FetchError, ListingRequest, MenuRequest};
use crate::utils::format_coordinate;

use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, warn};

pub struct HttpMarketplace {
    client: Client,
    config: MarketplaceConfig,
}

impl HttpMarketplace {
    pub fn new(config: MarketplaceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn listing_url(&self, req: &ListingRequest) -> Result<Url, FetchError> {
        let limit = req.limit.unwrap_or(self.config.listing_limit).to_string();
        let mut params = vec![
            ("country", self.config.country.clone()),
            ("latitude", format_coordinate(req.location.latitude)),
            ("longitude", format_coordinate(req.location.longitude)),
            ("language_id", self.config.language_id.to_string()),
            ("include", "characteristics".to_string()),
            ("dynamic_pricing", "0".to_string()),
            ("configuration", "Original".to_string()),
            ("vertical", "restaurants".to_string()),
            ("limit", limit),
            ("offset", "0".to_string()),
            ("customer_type", "regular".to_string()),
        ];
        if !req.cuisines.is_empty() {
            params.push(("cuisine", req.cuisines.join(",")));
        }

        Url::parse_with_params(&self.config.listing_url, &params)
            .map_err(|e| FetchError::Http(format!("invalid listing url: {e}")))
    }

    fn menu_url(&self, req: &MenuRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.vendor_url)
            .map_err(|e| FetchError::Http(format!("invalid vendor url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Http("vendor url cannot take a path".into()))?
            .pop_if_empty()
            .push(&req.code);
        url.query_pairs_mut()
            .append_pair("include", "menus")
            .append_pair("latitude", &format_coordinate(req.location.latitude))
            .append_pair("longitude", &format_coordinate(req.location.longitude));
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<String, FetchError> {
        info!("Fetching {}", url.path());
        let response = self
            .client
            .get(url)
            .header("x-disco-client-id", self.config.client_id.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Marketplace responded [{}]", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl Marketplace for HttpMarketplace {
    async fn fetch_listing(&self, req: &ListingRequest) -> Result<String, FetchError> {
        let url = self.listing_url(req)?;
        self.get(url).await
    }

    async fn fetch_menu(&self, req: &MenuRequest) -> Result<String, FetchError> {
        let url = self.menu_url(req)?;
        self.get(url).await
    }
}
