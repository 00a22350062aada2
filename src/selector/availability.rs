use crate::model::{Restaurant, RestaurantItem};

/// Keeps the vendors that currently deliver, in listing order.
pub fn filter_available(items: &[RestaurantItem]) -> Vec<Restaurant> {
    items
        .iter()
        .filter(|item| item.metadata.is_delivery_available)
        .map(Restaurant::from)
        .collect()
}
