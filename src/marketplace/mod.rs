mod fetcher;
mod traits;

pub use fetcher::HttpMarketplace;
pub use traits::Marketplace;
