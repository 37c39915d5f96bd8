//! Design experts and local vendors.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expert {
    pub id: u32,
    pub name: &'static str,
    pub title: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub languages: &'static [&'static str],
    pub specialties: &'static [&'static str],
    pub experience: &'static str,
    /// Price per session.
    pub price: f64,
    pub availability: &'static str,
}

pub const EXPERTS: &[Expert] = &[
    Expert {
        id: 1,
        name: "Riya Sharma",
        title: "Senior Interior Designer",
        rating: 4.8,
        reviews: 156,
        languages: &["English", "Hindi", "Telugu"],
        specialties: &["Modern", "Minimalist", "Contemporary"],
        experience: "8+ years",
        price: 500.0,
        availability: "Available now",
    },
    Expert {
        id: 2,
        name: "Sarah Johnson",
        title: "Space Planning Expert",
        rating: 4.7,
        reviews: 134,
        languages: &["English", "Hindi"],
        specialties: &["Small Spaces", "Budget-friendly", "Traditional"],
        experience: "6+ years",
        price: 400.0,
        availability: "Available in 30 min",
    },
    Expert {
        id: 3,
        name: "Alex Chen",
        title: "Luxury Design Consultant",
        rating: 4.9,
        reviews: 89,
        languages: &["English"],
        specialties: &["Luxury", "Corporate", "Modern"],
        experience: "10+ years",
        price: 800.0,
        availability: "Book for tomorrow",
    },
];

pub const CONSULTATION_SLOTS: &[&str] = &[
    "Now",
    "2:00 PM",
    "3:30 PM",
    "5:00 PM",
    "Tomorrow 10 AM",
    "Tomorrow 2 PM",
];

/// Canned replies used by the simulated expert chat.
pub const EXPERT_REPLIES: &[&str] = &[
    "That's a great question! For your space, I'd recommend...",
    "I can see the issue. Let me suggest a quick fix...",
    "Based on your budget, here are some alternatives...",
    "The lighting could be improved by placing a lamp here...",
    "This color combination would work better with your style...",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub item: &'static str,
    pub price: f64,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub distance: &'static str,
    pub delivery_time: &'static str,
    pub verified: bool,
    pub specialties: &'static [&'static str],
    pub address: &'static str,
    pub phone: &'static str,
    pub open_now: bool,
    pub offers: &'static [&'static str],
    pub portfolio: &'static [PortfolioEntry],
}

impl Vendor {
    /// Portfolio entry whose item name matches `item` (case-insensitive).
    pub fn quote_for(&self, item: &str) -> Option<&PortfolioEntry> {
        self.portfolio
            .iter()
            .find(|entry| entry.item.eq_ignore_ascii_case(item))
    }
}

pub const VENDORS: &[Vendor] = &[
    Vendor {
        id: "1",
        name: "Hyderabad Home Store",
        kind: "Furniture Retailer",
        rating: 4.6,
        reviews: 324,
        distance: "2.3 km",
        delivery_time: "2-4 days",
        verified: true,
        specialties: &["Modern Furniture", "Office Setup", "Bedroom"],
        address: "Jubilee Hills, Hyderabad",
        phone: "+91 98765 43210",
        open_now: true,
        offers: &["Free Delivery", "30-Day Return", "Installation Service"],
        portfolio: &[
            PortfolioEntry { item: "Oak Study Table", price: 7500.0, in_stock: true },
            PortfolioEntry { item: "Ergonomic Chair", price: 4200.0, in_stock: true },
            PortfolioEntry { item: "Wooden Bookshelf", price: 8900.0, in_stock: false },
        ],
    },
    Vendor {
        id: "2",
        name: "Office Plus",
        kind: "Office Furniture Specialist",
        rating: 4.4,
        reviews: 156,
        distance: "3.7 km",
        delivery_time: "1-3 days",
        verified: true,
        specialties: &["Office Chairs", "Desks", "Storage Solutions"],
        address: "Banjara Hills, Hyderabad",
        phone: "+91 98765 43211",
        open_now: true,
        offers: &["Bulk Discounts", "Same Day Delivery", "Setup Service"],
        portfolio: &[
            PortfolioEntry { item: "Executive Chair", price: 6500.0, in_stock: true },
            PortfolioEntry { item: "Standing Desk", price: 12000.0, in_stock: true },
        ],
    },
    Vendor {
        id: "3",
        name: "Light House",
        kind: "Lighting & Decor",
        rating: 4.7,
        reviews: 89,
        distance: "1.8 km",
        delivery_time: "1-2 days",
        verified: false,
        specialties: &["LED Lighting", "Decorative Lamps", "Smart Lights"],
        address: "Madhapur, Hyderabad",
        phone: "+91 98765 43212",
        open_now: false,
        offers: &["Energy Efficient", "2 Year Warranty"],
        portfolio: &[
            PortfolioEntry { item: "Modern Floor Lamp", price: 2800.0, in_stock: true },
            PortfolioEntry { item: "LED Strip Lights", price: 1200.0, in_stock: true },
        ],
    },
];

pub fn find_vendor(id: &str) -> Option<&'static Vendor> {
    VENDORS.iter().find(|v| v.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_lookup() {
        let vendor = find_vendor("1").unwrap();
        let quote = vendor.quote_for("oak study table").unwrap();
        assert_eq!(quote.price, 7500.0);
        assert!(!vendor.quote_for("Wooden Bookshelf").unwrap().in_stock);
        assert!(vendor.quote_for("Standing Desk").is_none());
    }

    #[test]
    fn test_rosters() {
        assert_eq!(EXPERTS.len(), 3);
        assert_eq!(EXPERT_REPLIES.len(), 5);
        assert!(find_vendor("9").is_none());
    }
}
