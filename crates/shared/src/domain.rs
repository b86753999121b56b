use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, PriceError};

const CENTS_PER_UNIT: u64 = 100;

/// Currency amount held in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "String")]
pub struct Price {
    cents: u64,
}

impl Price {
    pub fn from_cents(cents: u64) -> Result<Self, PriceError> {
        if cents == 0 {
            return Err(PriceError::NotPositive);
        }
        Ok(Self { cents })
    }

    pub fn from_whole(units: u64) -> Result<Self, PriceError> {
        let cents = units
            .checked_mul(CENTS_PER_UNIT)
            .ok_or(PriceError::OutOfRange)?;
        Self::from_cents(cents)
    }

    /// Caller guarantees `units` is non-zero and fits once scaled.
    pub(crate) const fn whole_unchecked(units: u64) -> Self {
        Self {
            cents: units * CENTS_PER_UNIT,
        }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    /// Total for `quantity` items, `None` when the amount does not fit.
    pub fn times(&self, quantity: u32) -> Option<Price> {
        self.cents
            .checked_mul(u64::from(quantity))
            .and_then(|cents| Price::from_cents(cents).ok())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.cents / CENTS_PER_UNIT;
        let fraction = self.cents % CENTS_PER_UNIT;
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{fraction:02}")
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (raw, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceError::Malformed(raw.to_string()));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceError::Malformed(raw.to_string()));
        }
        if raw.ends_with('.') {
            return Err(PriceError::Malformed(raw.to_string()));
        }

        let whole: u64 = whole.parse().map_err(|_| PriceError::OutOfRange)?;
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => u64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction.parse::<u64>().map_err(|_| PriceError::Malformed(raw.to_string()))?,
        };

        let cents = whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or(PriceError::OutOfRange)?;
        Self::from_cents(cents)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Whole(u64),
    Text(String),
}

impl TryFrom<PriceRepr> for Price {
    type Error = PriceError;

    fn try_from(value: PriceRepr) -> Result<Self, Self::Error> {
        match value {
            PriceRepr::Whole(units) => Price::from_whole(units),
            PriceRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

/// Immutable product record shown on the page and referenced by orders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    pub(crate) name: String,
    pub(crate) unit_price: Price,
    pub(crate) description: String,
    pub(crate) features: Vec<String>,
    pub(crate) images: Vec<String>,
}

#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    unit_price: Price,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CatalogError;

    fn try_from(value: ProductRecord) -> Result<Self, Self::Error> {
        Product::new(
            value.name,
            value.unit_price,
            value.description,
            value.features,
            value.images,
        )
    }
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        unit_price: Price,
        description: impl Into<String>,
        features: Vec<String>,
        images: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::MissingName);
        }
        Ok(Self {
            name,
            unit_price,
            description: description.into(),
            features,
            images,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// Contact and shipping fields captured by the order dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    FullName,
    Email,
    Phone,
    ShippingAddress,
}

impl OrderField {
    pub const ALL: [OrderField; 4] = [
        OrderField::FullName,
        OrderField::Email,
        OrderField::Phone,
        OrderField::ShippingAddress,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderField::FullName => "Full Name",
            OrderField::Email => "Email",
            OrderField::Phone => "Phone",
            OrderField::ShippingAddress => "Shipping Address",
        }
    }

    /// Key used for this field in the submitted form body.
    pub fn form_key(&self) -> &'static str {
        match self {
            OrderField::FullName => "name",
            OrderField::Email => "email",
            OrderField::Phone => "phone",
            OrderField::ShippingAddress => "address",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lower = raw.trim().to_ascii_lowercase();
        OrderField::ALL
            .into_iter()
            .find(|field| {
                field.form_key() == lower
                    || field.label().eq_ignore_ascii_case(&lower)
                    || (lower == "full_name" && *field == OrderField::FullName)
                    || (lower == "shipping_address" && *field == OrderField::ShippingAddress)
            })
            .ok_or_else(|| format!("unknown order field '{raw}'"))
    }
}

/// Order being composed in the dialog. `quantity` never drops below 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    full_name: String,
    email: String,
    phone: String,
    shipping_address: String,
    quantity: u32,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            shipping_address: String::new(),
            quantity: 1,
        }
    }
}

impl OrderDraft {
    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::FullName => &self.full_name,
            OrderField::Email => &self.email,
            OrderField::Phone => &self.phone,
            OrderField::ShippingAddress => &self.shipping_address,
        }
    }

    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) {
        let slot = match field {
            OrderField::FullName => &mut self.full_name,
            OrderField::Email => &mut self.email,
            OrderField::Phone => &mut self.phone,
            OrderField::ShippingAddress => &mut self.shipping_address,
        };
        *slot = value.into();
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Applies `delta` and clamps to a floor of 1. There is no upper bound.
    pub fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity).saturating_add(delta);
        self.quantity = next.clamp(1, i64::from(u32::MAX)) as u32;
    }

    /// Required fields that are empty or whitespace-only, in form order.
    pub fn missing_fields(&self) -> Vec<OrderField> {
        OrderField::ALL
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_prices() {
        assert_eq!("299".parse::<Price>().expect("whole").cents(), 29_900);
        assert_eq!("12.5".parse::<Price>().expect("one digit").cents(), 1_250);
        assert_eq!("12.05".parse::<Price>().expect("two digits").cents(), 1_205);
        assert_eq!(" 0.99 ".parse::<Price>().expect("trimmed").cents(), 99);
    }

    #[test]
    fn rejects_malformed_or_non_positive_prices() {
        for raw in ["", "abc", "-1", "1.234", "1.", ".5", "1.x", "0", "0.00"] {
            assert!(raw.parse::<Price>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn displays_whole_amounts_without_fraction() {
        let price = Price::from_whole(299).expect("price");
        assert_eq!(price.to_string(), "299");
        assert_eq!(price.times(2).expect("total").to_string(), "598");
        assert_eq!(Price::from_cents(2_550).expect("price").to_string(), "25.50");
    }

    #[test]
    fn total_is_unit_price_times_quantity() {
        let price = "19.99".parse::<Price>().expect("price");
        for quantity in 1..=50u32 {
            let total = price.times(quantity).expect("total");
            assert_eq!(total.cents(), 1_999 * u64::from(quantity));
        }
    }

    #[test]
    fn total_overflow_is_reported() {
        let price = Price::from_cents(u64::MAX / 2).expect("price");
        assert!(price.times(3).is_none());
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut draft = OrderDraft::default();
        for _ in 0..10 {
            draft.adjust_quantity(-1);
            assert_eq!(draft.quantity(), 1);
        }
        draft.adjust_quantity(3);
        assert_eq!(draft.quantity(), 4);
        draft.adjust_quantity(-100);
        assert_eq!(draft.quantity(), 1);
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::FullName, "Jane Doe");
        draft.set_field(OrderField::Email, "   ");
        draft.set_field(OrderField::Phone, "555-1111");

        assert_eq!(
            draft.missing_fields(),
            vec![OrderField::Email, OrderField::ShippingAddress]
        );
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::ShippingAddress, "1 Main St");
        draft.adjust_quantity(4);
        draft.reset();
        assert_eq!(draft, OrderDraft::default());
        assert_eq!(draft.quantity(), 1);
    }

    #[test]
    fn order_field_parses_form_keys_and_labels() {
        assert_eq!("name".parse::<OrderField>(), Ok(OrderField::FullName));
        assert_eq!(
            "Shipping Address".parse::<OrderField>(),
            Ok(OrderField::ShippingAddress)
        );
        assert_eq!("address".parse::<OrderField>(), Ok(OrderField::ShippingAddress));
        assert!("quantity".parse::<OrderField>().is_err());
    }

    #[test]
    fn product_deserializes_from_toml_with_string_or_integer_price() {
        let product: Product = toml::from_str(
            r#"
            name = "Desk Lamp"
            unit_price = "49.50"
            images = ["https://example.com/lamp.jpg"]
            "#,
        )
        .expect("product");
        assert_eq!(product.unit_price().cents(), 4_950);
        assert!(product.features().is_empty());

        let product: Product = toml::from_str("name = \"Mug\"\nunit_price = 12\n").expect("product");
        assert_eq!(product.unit_price().to_string(), "12");
    }

    #[test]
    fn product_requires_a_name_and_positive_price() {
        assert!(toml::from_str::<Product>("name = \" \"\nunit_price = 12\n").is_err());
        assert!(toml::from_str::<Product>("name = \"Mug\"\nunit_price = 0\n").is_err());
    }
}
