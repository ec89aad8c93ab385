//! The shopping cart: line items, totals, and display projection.
//!
//! The cart is an ordered sequence of line items, one per product, in the
//! order products were first added. Pure state - persistence and effects
//! live in [`crate::app`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agrolink_core::{CurrencyCode, Price, ProductId};

use crate::catalog::Product;

/// One product entry in the cart with its own quantity.
///
/// Invariant: `quantity >= 1`. A decrement that would reach zero removes
/// the line instead of storing a non-positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: Option<String>,
    pub farmer: String,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            image: product.image.clone(),
            farmer: product.farmer.clone(),
            quantity: 1,
        }
    }

    /// Line subtotal (unit price x quantity).
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Result of adjusting a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// Quantity changed; line still present.
    Updated,
    /// Adjustment reached zero or below; line removed.
    Removed,
    /// No line for that product; nothing changed.
    Missing,
}

/// Aggregate totals over all cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of quantities across lines.
    pub total_units: u32,
    /// Sum of line subtotals.
    pub total_price: Price,
}

/// One display-ready cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub product_id: ProductId,
    pub name: String,
    pub farmer: String,
    pub image: Option<String>,
    pub unit_price: Price,
    pub quantity: u32,
    pub subtotal: Price,
}

/// Read-only projection of the cart for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    /// No items; render the empty-cart state.
    Empty,
    /// One row per line item, plus totals.
    Items {
        rows: Vec<CartRow>,
        totals: CartTotals,
    },
}

/// Ordered collection of line items awaiting checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from a serialized snapshot.
    ///
    /// An absent or malformed snapshot yields an empty cart - a failed read
    /// is treated as "no saved state", never as an error.
    #[must_use]
    pub fn from_snapshot(snapshot: Option<&str>) -> Self {
        let Some(raw) = snapshot else {
            return Self::new();
        };
        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding malformed cart snapshot");
            Self::new()
        })
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same product gains quantity; otherwise a
    /// new line with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) {
        match self.position(&product.id) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity += 1;
                }
            }
            None => self.lines.push(CartLine::from_product(product)),
        }
    }

    /// Remove the line for `product_id`.
    ///
    /// Returns whether a line was actually removed; removing an absent
    /// line is a no-op (the cart is already in the requested state).
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product_id != product_id);
        self.lines.len() != before
    }

    /// Change the quantity of the line for `product_id` by `delta`.
    ///
    /// A resulting quantity of zero or below removes the line entirely.
    pub fn adjust_quantity(&mut self, product_id: &ProductId, delta: i32) -> AdjustOutcome {
        let Some(index) = self.position(product_id) else {
            return AdjustOutcome::Missing;
        };

        let current = self.lines.get(index).map_or(0, |line| line.quantity);
        let new_quantity = i64::from(current) + i64::from(delta);
        if new_quantity <= 0 {
            self.lines.remove(index);
            AdjustOutcome::Removed
        } else {
            if let Some(line) = self.lines.get_mut(index) {
                line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
            }
            AdjustOutcome::Updated
        }
    }

    /// Compute aggregate totals. Empty cart totals are (0, Rs. 0.00).
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let total_units = self.lines.iter().map(|line| line.quantity).sum();
        let total_amount: Decimal = self
            .lines
            .iter()
            .map(|line| line.subtotal().amount)
            .sum();
        let currency = self
            .lines
            .first()
            .map_or(CurrencyCode::LKR, |line| line.unit_price.currency_code);

        CartTotals {
            total_units,
            total_price: Price::new(total_amount, currency),
        }
    }

    /// Display-ready projection.
    #[must_use]
    pub fn view(&self) -> CartView {
        if self.lines.is_empty() {
            return CartView::Empty;
        }

        let rows = self
            .lines
            .iter()
            .map(|line| CartRow {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                farmer: line.farmer.clone(),
                image: line.image.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();

        CartView::Items {
            rows,
            totals: self.totals(),
        }
    }

    /// Drop every line item.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| &line.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::{ProductCatalog, StaticCatalog};
    use rust_decimal::dec;

    fn product(id: &str) -> Product {
        StaticCatalog::with_demo_products()
            .lookup(&ProductId::new(id))
            .unwrap()
    }

    #[test]
    fn test_repeated_add_same_product_is_one_line() {
        let mut cart = Cart::new();
        let tomatoes = product("1");
        for _ in 0..5 {
            cart.add(&tomatoes);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(&product("2"));
        cart.add(&product("1"));
        cart.add(&product("2"));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = Cart::new().totals();
        assert_eq!(totals.total_units, 0);
        assert_eq!(totals.total_price.amount, Decimal::ZERO);
    }

    #[test]
    fn test_totals_single_item() {
        let mut cart = Cart::new();
        cart.add(&product("1"));

        let totals = cart.totals();
        assert_eq!(totals.total_units, 1);
        assert_eq!(totals.total_price, Price::rupees(dec!(120)));
    }

    #[test]
    fn test_totals_mixed_quantities() {
        let mut cart = Cart::new();
        cart.add(&product("1"));
        cart.add(&product("1"));
        cart.add(&product("2"));

        let totals = cart.totals();
        assert_eq!(totals.total_units, 3);
        assert_eq!(totals.total_price, Price::rupees(dec!(420)));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("1"));
        let before = cart.clone();

        assert!(!cart.remove(&ProductId::new("999")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_adjust_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product("1"));
        cart.add(&product("1"));

        assert_eq!(
            cart.adjust_quantity(&ProductId::new("1"), -2),
            AdjustOutcome::Removed
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product("1"));

        assert_eq!(
            cart.adjust_quantity(&ProductId::new("1"), -10),
            AdjustOutcome::Removed
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_missing_line() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.adjust_quantity(&ProductId::new("1"), 1),
            AdjustOutcome::Missing
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_never_below_one() {
        let mut cart = Cart::new();
        cart.add(&product("1"));
        cart.add(&product("1"));
        cart.adjust_quantity(&ProductId::new("1"), -1);

        assert_eq!(cart.lines()[0].quantity, 1);
        cart.adjust_quantity(&ProductId::new("1"), -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_view_empty() {
        assert_eq!(Cart::new().view(), CartView::Empty);
    }

    #[test]
    fn test_view_rows_and_subtotals() {
        let mut cart = Cart::new();
        cart.add(&product("1"));
        cart.add(&product("1"));
        cart.add(&product("3"));

        let CartView::Items { rows, totals } = cart.view() else {
            panic!("expected items view");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subtotal, Price::rupees(dec!(240)));
        assert_eq!(rows[1].subtotal, Price::rupees(dec!(95)));
        assert_eq!(totals.total_price, Price::rupees(dec!(335)));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.add(&product("2"));
        cart.add(&product("1"));
        cart.add(&product("2"));

        let snapshot = cart.to_snapshot().unwrap();
        let restored = Cart::from_snapshot(Some(&snapshot));
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_snapshot_absent_or_malformed_is_empty() {
        assert!(Cart::from_snapshot(None).is_empty());
        assert!(Cart::from_snapshot(Some("{not json")).is_empty());
    }
}
