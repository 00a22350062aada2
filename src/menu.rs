// Menu documents: the nested marketplace shape and the flattened display shape
use crate::utils::null_as_default;
use serde::{Deserialize, Serialize};

/// Envelope of the vendor detail response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: RawMenuDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMenuDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub menus: Vec<RawMenu>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMenu {
    #[serde(default, deserialize_with = "null_as_default")]
    pub menu_categories: Vec<RawCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<RawProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_variations: Vec<RawVariation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawVariation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
}

/// Display-ready menu: categories of items, first upstream menu only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedMenu {
    pub name: String,
    #[serde(default)]
    pub menu: Vec<Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub products: Vec<Item>,
}

/// An item carries either a flat `price` or a list of `variations`, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub name: String,
    pub price: f64,
}
