use crate::menu::{
    Category, Item, RawCategory, RawMenuDocument, RawProduct, SimplifiedMenu, Variation,
};

/// Flattens the first menu of a vendor document into categories of display items.
/// A document without menus yields an empty menu under the vendor's name.
pub fn normalize(doc: &RawMenuDocument) -> SimplifiedMenu {
    let menu = doc
        .menus
        .first()
        .map(|menu| menu.menu_categories.iter().map(normalize_category).collect())
        .unwrap_or_default();

    SimplifiedMenu {
        name: doc.name.clone(),
        menu,
    }
}

/// A single anonymous variation is just the item's price.
pub fn is_flat_priced(variations: &[Variation]) -> bool {
    matches!(variations, [only] if only.name.is_empty())
}

fn normalize_category(category: &RawCategory) -> Category {
    Category {
        name: category.name.clone(),
        description: category.description.clone(),
        products: category.products.iter().map(normalize_product).collect(),
    }
}

fn normalize_product(product: &RawProduct) -> Item {
    let variations: Vec<Variation> = product
        .product_variations
        .iter()
        .map(|v| Variation {
            name: v.name.clone(),
            price: v.price,
        })
        .collect();

    let (price, variations) = if is_flat_priced(&variations) {
        (variations.first().map(|v| v.price), Vec::new())
    } else {
        (None, variations)
    };

    Item {
        name: product.name.clone(),
        description: product.description.clone(),
        price,
        image_url: product.file_path.clone(),
        variations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuResponse, RawMenu, RawVariation};

    fn product(name: &str, variations: &[(&str, f64)]) -> RawProduct {
        RawProduct {
            name: name.into(),
            description: format!("{name} description"),
            file_path: format!("https://images.example/{name}.jpg"),
            product_variations: variations
                .iter()
                .map(|(name, price)| RawVariation {
                    name: (*name).into(),
                    price: *price,
                })
                .collect(),
        }
    }

    fn document(products: Vec<RawProduct>) -> RawMenuDocument {
        RawMenuDocument {
            name: "Noodle House".into(),
            menus: vec![RawMenu {
                menu_categories: vec![RawCategory {
                    name: "Mains".into(),
                    description: "Hot dishes".into(),
                    products,
                }],
            }],
        }
    }

    // Re-expands a simplified menu into the upstream shape.
    fn expand(menu: &SimplifiedMenu) -> RawMenuDocument {
        let categories = menu
            .menu
            .iter()
            .map(|category| RawCategory {
                name: category.name.clone(),
                description: category.description.clone(),
                products: category
                    .products
                    .iter()
                    .map(|item| RawProduct {
                        name: item.name.clone(),
                        description: item.description.clone(),
                        file_path: item.image_url.clone(),
                        product_variations: match item.price {
                            Some(price) => vec![RawVariation { name: String::new(), price }],
                            None => item
                                .variations
                                .iter()
                                .map(|v| RawVariation { name: v.name.clone(), price: v.price })
                                .collect(),
                        },
                    })
                    .collect(),
            })
            .collect();
        RawMenuDocument {
            name: menu.name.clone(),
            menus: vec![RawMenu { menu_categories: categories }],
        }
    }

    #[test]
    fn anonymous_single_variation_collapses() {
        let menu = normalize(&document(vec![product("Dumplings", &[("", 12.5)])]));
        let item = &menu.menu[0].products[0];
        assert_eq!(item.price, Some(12.5));
        assert!(item.variations.is_empty());
    }

    #[test]
    fn named_single_variation_is_kept() {
        let menu = normalize(&document(vec![product("Ramen", &[("Large", 15.0)])]));
        let item = &menu.menu[0].products[0];
        assert_eq!(item.price, None);
        assert_eq!(
            item.variations,
            vec![Variation { name: "Large".into(), price: 15.0 }]
        );
    }

    #[test]
    fn several_variations_keep_order() {
        let menu = normalize(&document(vec![product("Tea", &[("", 3.0), ("Large", 4.0)])]));
        let names: Vec<&str> = menu.menu[0].products[0]
            .variations
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["", "Large"]);
        assert_eq!(menu.menu[0].products[0].price, None);
    }

    #[test]
    fn no_variations_has_neither_price_nor_variations() {
        let menu = normalize(&document(vec![product("Water", &[])]));
        let item = &menu.menu[0].products[0];
        assert_eq!(item.price, None);
        assert!(item.variations.is_empty());
        let json = serde_json::to_value(item).unwrap();
        assert!(json.get("price").is_none());
        assert!(json.get("variations").is_none());
    }

    #[test]
    fn only_first_menu_is_used() {
        let mut doc = document(vec![product("Dumplings", &[("", 12.5)])]);
        doc.menus.push(RawMenu {
            menu_categories: vec![RawCategory {
                name: "Breakfast".into(),
                ..Default::default()
            }],
        });
        let menu = normalize(&doc);
        assert_eq!(menu.menu.len(), 1);
        assert_eq!(menu.menu[0].name, "Mains");
    }

    #[test]
    fn missing_menus_yield_empty_result() {
        let doc = RawMenuDocument {
            name: "Closed Kitchen".into(),
            menus: Vec::new(),
        };
        let menu = normalize(&doc);
        assert_eq!(menu.name, "Closed Kitchen");
        assert!(menu.menu.is_empty());
    }

    #[test]
    fn flat_price_predicate() {
        let anonymous = Variation { name: String::new(), price: 1.0 };
        let named = Variation { name: "Small".into(), price: 1.0 };
        assert!(is_flat_priced(std::slice::from_ref(&anonymous)));
        assert!(!is_flat_priced(std::slice::from_ref(&named)));
        assert!(!is_flat_priced(&[]));
        assert!(!is_flat_priced(&[anonymous.clone(), anonymous]));
    }

    #[test]
    fn normalizing_is_idempotent() {
        let doc = document(vec![
            product("Dumplings", &[("", 12.5)]),
            product("Ramen", &[("Regular", 12.0), ("Large", 15.0)]),
            product("Water", &[]),
        ]);
        let once = normalize(&doc);
        let twice = normalize(&expand(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn decodes_upstream_document() {
        let body = r#"{
            "data": {
                "name": "Noodle House",
                "menus": [{
                    "menu_categories": [{
                        "name": "Mains",
                        "description": null,
                        "products": [{
                            "name": "Dumplings",
                            "description": "Pork",
                            "file_path": "https://images.example/d.jpg",
                            "product_variations": [{"name": null, "price": 120}]
                        }]
                    }]
                }]
            }
        }"#;
        let response: MenuResponse = serde_json::from_str(body).unwrap();
        let menu = normalize(&response.data);
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["name"], "Noodle House");
        assert_eq!(json["menu"][0]["description"], "");
        assert_eq!(json["menu"][0]["products"][0]["price"], 120.0);
        assert_eq!(
            json["menu"][0]["products"][0]["image_url"],
            "https://images.example/d.jpg"
        );
    }
}
