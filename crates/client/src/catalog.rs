//! Product catalog collaborator.
//!
//! The catalog is an external source of product metadata. The client only
//! ever reads from it; [`StaticCatalog`] ships the fixed demo listing the
//! marketplace launched with, and production deployments substitute a real
//! catalog query behind the same trait.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agrolink_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price per unit (per kilogram for produce).
    pub unit_price: Price,
    /// Image URL, if the seller uploaded one.
    pub image: Option<String>,
    /// Display name of the selling farmer.
    pub farmer: String,
    /// Growing region, used for filtering.
    pub location: String,
    /// Listing category (e.g., "vegetables", "grains").
    pub category: String,
    pub description: String,
}

/// Search/filter criteria for product listings.
///
/// Empty criteria match everything; criteria compose with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub location: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    /// Case-insensitive substring match on the product name.
    pub search: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && &product.category != category
        {
            return false;
        }
        if let Some(location) = &self.location
            && &product.location != location
        {
            return false;
        }
        if let Some(min) = self.price_min
            && product.unit_price.amount < min
        {
            return false;
        }
        if let Some(max) = self.price_max
            && product.unit_price.amount > max
        {
            return false;
        }
        if let Some(search) = &self.search
            && !product
                .name
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Catalog order, unchanged.
    #[default]
    Default,
    PriceLowToHigh,
    PriceHighToLow,
    Name,
}

/// Read-only product catalog.
pub trait ProductCatalog {
    /// Resolve a product by ID, or `None` if it is not listed.
    fn lookup(&self, id: &ProductId) -> Option<Product>;

    /// All listed products, in catalog order.
    fn all(&self) -> Vec<Product>;

    /// Filtered and sorted listing.
    fn search(&self, filter: &ProductFilter, sort: ProductSort) -> Vec<Product> {
        let mut products: Vec<Product> =
            self.all().into_iter().filter(|p| filter.matches(p)).collect();
        match sort {
            ProductSort::Default => {}
            ProductSort::PriceLowToHigh => {
                products.sort_by_key(|p| p.unit_price.amount);
            }
            ProductSort::PriceHighToLow => {
                products.sort_by_key(|p| std::cmp::Reverse(p.unit_price.amount));
            }
            ProductSort::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        products
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a catalog from an explicit product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo listing the marketplace launched with.
    #[must_use]
    pub fn with_demo_products() -> Self {
        Self::new(vec![
            Product {
                id: ProductId::new("1"),
                name: "Fresh Tomatoes".to_owned(),
                unit_price: Price::rupees(Decimal::from(120)),
                image: None,
                farmer: "Ranjith Fernando".to_owned(),
                location: "Matale".to_owned(),
                category: "vegetables".to_owned(),
                description: "Fresh organic tomatoes from Matale region".to_owned(),
            },
            Product {
                id: ProductId::new("2"),
                name: "Green Beans".to_owned(),
                unit_price: Price::rupees(Decimal::from(180)),
                image: None,
                farmer: "Kumari Silva".to_owned(),
                location: "Kandy".to_owned(),
                category: "vegetables".to_owned(),
                description: "Premium quality green beans".to_owned(),
            },
            Product {
                id: ProductId::new("3"),
                name: "Red Rice".to_owned(),
                unit_price: Price::rupees(Decimal::from(95)),
                image: None,
                farmer: "Sunil Perera".to_owned(),
                location: "Anuradhapura".to_owned(),
                category: "grains".to_owned(),
                description: "Traditional red rice variety".to_owned(),
            },
        ])
    }
}

impl ProductCatalog for StaticCatalog {
    fn lookup(&self, id: &ProductId) -> Option<Product> {
        self.products.iter().find(|p| &p.id == id).cloned()
    }

    fn all(&self) -> Vec<Product> {
        self.products.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_lookup_known_product() {
        let catalog = StaticCatalog::with_demo_products();
        let product = catalog.lookup(&ProductId::new("1")).unwrap();
        assert_eq!(product.name, "Fresh Tomatoes");
        assert_eq!(product.unit_price, Price::rupees(dec!(120)));
    }

    #[test]
    fn test_lookup_unknown_product() {
        let catalog = StaticCatalog::with_demo_products();
        assert!(catalog.lookup(&ProductId::new("999")).is_none());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = StaticCatalog::with_demo_products();
        let filter = ProductFilter {
            category: Some("vegetables".to_owned()),
            ..ProductFilter::default()
        };
        let results = catalog.search(&filter, ProductSort::Default);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.category == "vegetables"));
    }

    #[test]
    fn test_filter_by_price_range() {
        let catalog = StaticCatalog::with_demo_products();
        let filter = ProductFilter {
            price_min: Some(dec!(100)),
            price_max: Some(dec!(150)),
            ..ProductFilter::default()
        };
        let results = catalog.search(&filter, ProductSort::Default);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Fresh Tomatoes");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = StaticCatalog::with_demo_products();
        let filter = ProductFilter {
            search: Some("RICE".to_owned()),
            ..ProductFilter::default()
        };
        let results = catalog.search(&filter, ProductSort::Default);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Red Rice");
    }

    #[test]
    fn test_sort_price_low_to_high() {
        let catalog = StaticCatalog::with_demo_products();
        let results = catalog.search(&ProductFilter::default(), ProductSort::PriceLowToHigh);
        let prices: Vec<Decimal> = results.iter().map(|p| p.unit_price.amount).collect();
        assert_eq!(prices, vec![dec!(95), dec!(120), dec!(180)]);
    }

    #[test]
    fn test_sort_by_name() {
        let catalog = StaticCatalog::with_demo_products();
        let results = catalog.search(&ProductFilter::default(), ProductSort::Name);
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fresh Tomatoes", "Green Beans", "Red Rice"]);
    }
}
