//! Built-in product catalog.

use crate::domain::{Price, Product};

const DEFAULT_PRODUCT_NAME: &str = "Limited Edition Mechanical Watch";
const DEFAULT_UNIT_PRICE: u64 = 299;
const DEFAULT_DESCRIPTION: &str = "Handcrafted timepiece with precision Japanese movement";
const DEFAULT_FEATURES: [&str; 4] = [
    "Sapphire crystal glass",
    "316L stainless steel case",
    "Water resistant to 100m",
    "Genuine leather strap",
];
const DEFAULT_IMAGES: [&str; 2] = [
    "https://images.unsplash.com/photo-1524592094714-0f0654e20314?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1522312346375-d1a52e2b99b3?auto=format&fit=crop&q=80&w=1200",
];

/// Read-only source of the product offered on the page.
pub trait ProductCatalog: Send + Sync {
    fn product(&self) -> &Product;
}

#[derive(Debug, Clone)]
pub struct StaticCatalog {
    product: Product,
}

impl StaticCatalog {
    pub fn new(product: Product) -> Self {
        Self { product }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(default_product())
    }
}

impl ProductCatalog for StaticCatalog {
    fn product(&self) -> &Product {
        &self.product
    }
}

pub fn default_product() -> Product {
    Product {
        name: DEFAULT_PRODUCT_NAME.to_string(),
        unit_price: Price::whole_unchecked(DEFAULT_UNIT_PRICE),
        description: DEFAULT_DESCRIPTION.to_string(),
        features: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
        images: DEFAULT_IMAGES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_offers_the_watch() {
        let catalog = StaticCatalog::default();
        let product = catalog.product();
        assert_eq!(product.name(), "Limited Edition Mechanical Watch");
        assert_eq!(product.unit_price().to_string(), "299");
        assert_eq!(product.features().len(), 4);
        assert_eq!(product.images().len(), 2);
    }
}
