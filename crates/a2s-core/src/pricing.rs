//! Order totals and budget maths shown on the placement and checkout screens.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::catalog;
use crate::state::CartItem;

pub const DELIVERY_FEE: f64 = 299.0;
pub const INSTALLATION_FEE: f64 = 500.0;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Wallet,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Wallet => "Digital Wallet",
            PaymentMethod::Cod => "Cash on Delivery",
        }
    }
}

/// Traffic-light status of spending against an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    /// Above 80% of the allocation.
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn of(spent: f64, allocated: f64) -> Self {
        if allocated <= 0.0 {
            return if spent > 0.0 { Self::Over } else { Self::Ok };
        }
        let ratio = spent / allocated;
        if ratio > 1.0 {
            Self::Over
        } else if ratio > 0.8 {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub price: f64,
    pub original_price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub subtotal: f64,
    pub savings: f64,
    pub delivery: f64,
    pub installation: f64,
    pub total: f64,
    pub budget: f64,
    /// `total / budget` as a percentage; zero when no budget is set.
    pub budget_used_percent: f64,
    /// How far `total` exceeds the budget, zero when within it.
    pub over_budget_by: f64,
}

impl OrderSummary {
    /// Builds the checkout summary for a cart. Original prices come from the
    /// catalog; items unknown to it are treated as undiscounted.
    pub fn from_cart(items: &[CartItem], budget: f64) -> Self {
        let lines: Vec<OrderLine> = items
            .iter()
            .map(|item| OrderLine {
                id: item.id.clone(),
                name: item.name.clone(),
                vendor: item.vendor.clone(),
                price: item.price,
                original_price: catalog::find(&item.id)
                    .map(|c| c.original_price.max(item.price))
                    .unwrap_or(item.price),
                quantity: 1,
            })
            .collect();

        let subtotal: f64 = lines.iter().map(|l| l.price * l.quantity as f64).sum();
        let savings: f64 = lines
            .iter()
            .map(|l| (l.original_price - l.price) * l.quantity as f64)
            .sum();
        let (delivery, installation) = if lines.is_empty() {
            (0.0, 0.0)
        } else {
            (DELIVERY_FEE, INSTALLATION_FEE)
        };
        let total = subtotal + delivery + installation;

        Self {
            lines,
            subtotal,
            savings,
            delivery,
            installation,
            total,
            budget,
            budget_used_percent: if budget > 0.0 { total / budget * 100.0 } else { 0.0 },
            over_budget_by: (total - budget).max(0.0),
        }
    }

    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::of(self.total, self.budget)
    }
}

/// Spending in one category against its allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    pub allocated: f64,
    pub spent: f64,
    pub items: Vec<String>,
}

impl CategorySpend {
    pub fn status(&self) -> BudgetStatus {
        BudgetStatus::of(self.spent, self.allocated)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub total_budget: f64,
    pub categories: Vec<CategorySpend>,
}

impl BudgetBreakdown {
    /// Groups the cart by category. Each category present in the cart gets
    /// an equal share of the budget as its allocation.
    pub fn from_cart(total_budget: f64, items: &[CartItem]) -> Self {
        let mut categories: Vec<CategorySpend> = Vec::new();
        for item in items {
            match categories.iter_mut().find(|c| c.category == item.category) {
                Some(spend) => {
                    spend.spent += item.price;
                    spend.items.push(item.name.clone());
                }
                None => categories.push(CategorySpend {
                    category: item.category.clone(),
                    allocated: 0.0,
                    spent: item.price,
                    items: vec![item.name.clone()],
                }),
            }
        }

        if !categories.is_empty() {
            let share = total_budget / categories.len() as f64;
            for spend in &mut categories {
                spend.allocated = share;
            }
        }

        Self {
            total_budget,
            categories,
        }
    }

    pub fn total_spent(&self) -> f64 {
        self.categories.iter().map(|c| c.spent).sum()
    }

    pub fn remaining(&self) -> f64 {
        self.total_budget - self.total_spent()
    }

    pub fn is_over_budget(&self) -> bool {
        self.total_spent() > self.total_budget
    }

    pub fn utilization_percent(&self) -> f64 {
        if self.total_budget > 0.0 {
            self.total_spent() / self.total_budget * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Vec<CartItem> {
        ["oak-study-table", "ergonomic-chair", "modern-floor-lamp"]
            .iter()
            .filter_map(|id| catalog::find(id))
            .map(CartItem::from)
            .collect()
    }

    #[test]
    fn test_order_summary_for_three_item_cart() {
        let summary = OrderSummary::from_cart(&cart(), 30000.0);
        assert_eq!(summary.subtotal, 14500.0);
        assert_eq!(summary.savings, 3200.0);
        assert_eq!(summary.total, 15299.0);
        assert_eq!(summary.over_budget_by, 0.0);
        assert_eq!(summary.status(), BudgetStatus::Ok);
    }

    #[test]
    fn test_order_summary_over_budget() {
        let summary = OrderSummary::from_cart(&cart(), 15000.0);
        assert_eq!(summary.over_budget_by, 299.0);
        assert_eq!(summary.status(), BudgetStatus::Over);
    }

    #[test]
    fn test_empty_cart_has_no_fees() {
        let summary = OrderSummary::from_cart(&[], 0.0);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.budget_used_percent, 0.0);
    }

    #[test]
    fn test_payment_method_parses_ids() {
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cod);
        assert_eq!(PaymentMethod::default().to_string(), "upi");
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(BudgetStatus::of(80.0, 100.0), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::of(81.0, 100.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::of(101.0, 100.0), BudgetStatus::Over);
        assert_eq!(BudgetStatus::of(1.0, 0.0), BudgetStatus::Over);
    }

    #[test]
    fn test_breakdown_groups_by_category() {
        let mut items = cart();
        items.push(CartItem::from(catalog::find("led-desk-lamp").unwrap()));
        let breakdown = BudgetBreakdown::from_cart(30000.0, &items);

        assert_eq!(breakdown.categories.len(), 3);
        let lighting = breakdown
            .categories
            .iter()
            .find(|c| c.category == "lighting")
            .unwrap();
        assert_eq!(lighting.spent, 4000.0);
        assert_eq!(lighting.allocated, 10000.0);
        assert_eq!(breakdown.total_spent(), 15700.0);
        assert_eq!(breakdown.remaining(), 14300.0);
        assert!(!breakdown.is_over_budget());
    }
}
