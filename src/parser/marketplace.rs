use crate::menu::{MenuResponse, RawMenuDocument};
use crate::model::{CoreError, ListingResponse};

/// Decodes a vendor listing body.
pub fn parse_listing(body: &str) -> Result<ListingResponse, CoreError> {
    serde_json::from_str(body).map_err(|e| CoreError::MalformedInput(format!("listing: {e}")))
}

/// Decodes a vendor detail body and returns the menu document inside its `data` envelope.
pub fn parse_menu(body: &str) -> Result<RawMenuDocument, CoreError> {
    let response: MenuResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::MalformedInput(format!("menu: {e}")))?;
    Ok(response.data)
}
