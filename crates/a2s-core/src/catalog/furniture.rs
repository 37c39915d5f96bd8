use serde::Serialize;

use crate::state::CartItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: f64,
    /// List price before discount; equal to `price` when not discounted.
    pub original_price: f64,
    /// Category id, one of [`CATEGORIES`] except `all`.
    pub category: &'static str,
    pub vendor: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub dimensions: &'static str,
    pub material: &'static str,
    pub in_stock: bool,
    pub delivery_time: &'static str,
    pub is_local_vendor: bool,
    pub is_best_fit: bool,
}

impl FurnitureItem {
    pub fn savings(&self) -> f64 {
        (self.original_price - self.price).max(0.0)
    }

    pub fn is_discounted(&self) -> bool {
        self.original_price > self.price
    }

    /// Floor area in square metres, from the `WxDxH cm` dimensions.
    pub fn footprint_m2(&self) -> Option<f64> {
        let mut sides = self.dimensions.trim_end_matches("cm").trim().split('x');
        let width: f64 = sides.next()?.trim().parse().ok()?;
        let depth: f64 = sides.next()?.trim().parse().ok()?;
        Some(width * depth / 10_000.0)
    }
}

impl From<&FurnitureItem> for CartItem {
    fn from(item: &FurnitureItem) -> Self {
        CartItem {
            id: item.id.to_string(),
            name: item.name.to_string(),
            price: item.price,
            category: item.category.to_string(),
            vendor: item.vendor.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Listing count shown on the filter chip.
    pub count: u32,
}

pub const CATEGORIES: &[Category] = &[
    Category { id: "all", name: "All", count: 124 },
    Category { id: "tables", name: "Tables", count: 32 },
    Category { id: "chairs", name: "Chairs", count: 28 },
    Category { id: "storage", name: "Storage", count: 24 },
    Category { id: "lighting", name: "Lighting", count: 18 },
    Category { id: "decor", name: "Decor", count: 22 },
];

pub const FURNITURE: &[FurnitureItem] = &[
    FurnitureItem {
        id: "oak-study-table",
        name: "Minimalist Oak Study Table",
        price: 7500.0,
        original_price: 9000.0,
        category: "tables",
        vendor: "Hyderabad Home Store",
        rating: 4.6,
        reviews: 124,
        dimensions: "120x60x75 cm",
        material: "Solid Oak Wood",
        in_stock: true,
        delivery_time: "3-5 days",
        is_local_vendor: true,
        is_best_fit: true,
    },
    FurnitureItem {
        id: "ergonomic-chair",
        name: "Ergonomic Office Chair",
        price: 4200.0,
        original_price: 5500.0,
        category: "chairs",
        vendor: "Office Plus",
        rating: 4.4,
        reviews: 89,
        dimensions: "65x65x110 cm",
        material: "Mesh & Steel",
        in_stock: true,
        delivery_time: "2-4 days",
        is_local_vendor: true,
        is_best_fit: false,
    },
    FurnitureItem {
        id: "modern-floor-lamp",
        name: "Modern Floor Lamp",
        price: 2800.0,
        original_price: 3200.0,
        category: "lighting",
        vendor: "Light House",
        rating: 4.7,
        reviews: 156,
        dimensions: "30x30x150 cm",
        material: "Brushed Steel",
        in_stock: true,
        delivery_time: "1-3 days",
        is_local_vendor: false,
        is_best_fit: true,
    },
    FurnitureItem {
        id: "wooden-bookshelf",
        name: "Wooden Bookshelf",
        price: 8900.0,
        original_price: 11000.0,
        category: "storage",
        vendor: "Wood Craft",
        rating: 4.5,
        reviews: 67,
        dimensions: "80x30x180 cm",
        material: "Engineered Wood",
        in_stock: true,
        delivery_time: "5-7 days",
        is_local_vendor: true,
        is_best_fit: false,
    },
    FurnitureItem {
        id: "led-desk-lamp",
        name: "LED Desk Lamp with Wireless Charging",
        price: 1200.0,
        original_price: 1200.0,
        category: "lighting",
        vendor: "Tech Store",
        rating: 4.5,
        reviews: 67,
        dimensions: "20x20x45 cm",
        material: "Aluminum & Plastic",
        in_stock: false,
        delivery_time: "7-10 days",
        is_local_vendor: false,
        is_best_fit: false,
    },
    FurnitureItem {
        id: "storage-ottoman",
        name: "Velvet Storage Ottoman",
        price: 2500.0,
        original_price: 2500.0,
        category: "decor",
        vendor: "Home Decor Co",
        rating: 4.4,
        reviews: 43,
        dimensions: "50x35x40 cm",
        material: "Velvet & Wood",
        in_stock: true,
        delivery_time: "5-7 days",
        is_local_vendor: true,
        is_best_fit: false,
    },
];

pub fn find(id: &str) -> Option<&'static FurnitureItem> {
    FURNITURE.iter().find(|item| item.id == id)
}

/// Case-insensitive name search within a category (`"all"` matches every
/// category). An empty query matches every name.
pub fn search(query: &str, category: &str) -> Vec<&'static FurnitureItem> {
    let query = query.trim().to_lowercase();
    FURNITURE
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .filter(|item| category == "all" || item.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_name_is_case_insensitive() {
        let hits = search("OAK", "all");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "oak-study-table");
    }

    #[test]
    fn test_search_by_category() {
        let lighting: Vec<_> = search("", "lighting").iter().map(|i| i.id).collect();
        assert_eq!(lighting, vec!["modern-floor-lamp", "led-desk-lamp"]);
        assert!(search("chair", "tables").is_empty());
    }

    #[test]
    fn test_footprint_from_dimensions() {
        let table = find("oak-study-table").unwrap();
        assert!((table.footprint_m2().unwrap() - 0.72).abs() < 1e-9);
        assert!(FURNITURE.iter().all(|item| item.footprint_m2().is_some()));
    }

    #[test]
    fn test_every_item_has_a_listed_category() {
        for item in FURNITURE {
            assert!(
                CATEGORIES.iter().any(|c| c.id == item.category),
                "{} has unknown category {}",
                item.id,
                item.category
            );
        }
    }

    #[test]
    fn test_cart_item_conversion() {
        let item = find("ergonomic-chair").unwrap();
        let cart: CartItem = item.into();
        assert_eq!(cart.price, 4200.0);
        assert_eq!(cart.vendor, "Office Plus");
        assert_eq!(item.savings(), 1300.0);
    }
}
