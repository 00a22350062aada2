// Marketplace-specific JSON decoding
mod marketplace;

pub use marketplace::{parse_listing, parse_menu};
