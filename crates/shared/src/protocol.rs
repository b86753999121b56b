use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::{
    domain::{OrderDraft, OrderField, Price, Product},
    error::SubmissionFailure,
};

/// Snapshot of a valid draft, serialized as the form body posted to the
/// order-intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    #[serde(rename = "name")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub product: String,
    pub quantity: u32,
    #[serde(rename = "totalPrice")]
    pub total_price: Price,
    #[serde(rename = "orderDate")]
    pub order_date: String,
}

impl OrderRequest {
    /// Builds the request from the current draft. Fails without side effects
    /// when a required field is blank or the total cannot be represented.
    pub fn from_draft(
        draft: &OrderDraft,
        product: &Product,
        placed_at: DateTime<Utc>,
    ) -> Result<Self, SubmissionFailure> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(SubmissionFailure::ValidationFailed(missing));
        }

        let quantity = draft.quantity();
        let total_price = product
            .unit_price()
            .times(quantity)
            .ok_or(SubmissionFailure::InvalidQuantity(quantity))?;

        Ok(Self {
            full_name: draft.field(OrderField::FullName).to_string(),
            email: draft.field(OrderField::Email).to_string(),
            phone: draft.field(OrderField::Phone).to_string(),
            address: draft.field(OrderField::ShippingAddress).to_string(),
            product: product.name().to_string(),
            quantity,
            total_price,
            order_date: format_order_date(placed_at),
        })
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2024-03-01T12:30:00.000Z`.
pub fn format_order_date(placed_at: DateTime<Utc>) -> String {
    placed_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::catalog::default_product;

    fn filled_draft() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.set_field(OrderField::FullName, "Jane Doe");
        draft.set_field(OrderField::Email, "jane@x.com");
        draft.set_field(OrderField::Phone, "555-1111");
        draft.set_field(OrderField::ShippingAddress, "1 Main St");
        draft
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn snapshot_carries_draft_product_and_total() {
        let mut draft = filled_draft();
        draft.adjust_quantity(1);

        let request =
            OrderRequest::from_draft(&draft, &default_product(), fixed_time()).expect("request");

        assert_eq!(request.full_name, "Jane Doe");
        assert_eq!(request.address, "1 Main St");
        assert_eq!(request.product, "Limited Edition Mechanical Watch");
        assert_eq!(request.quantity, 2);
        assert_eq!(request.total_price.to_string(), "598");
        assert_eq!(request.order_date, "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn blank_fields_are_rejected_before_snapshot() {
        let mut draft = filled_draft();
        draft.set_field(OrderField::Email, "");
        draft.set_field(OrderField::Phone, " \t ");

        let err = OrderRequest::from_draft(&draft, &default_product(), fixed_time())
            .expect_err("must fail");
        assert_eq!(
            err,
            SubmissionFailure::ValidationFailed(vec![OrderField::Email, OrderField::Phone])
        );
    }

    #[test]
    fn serializes_with_wire_keys() {
        let request = OrderRequest::from_draft(&filled_draft(), &default_product(), fixed_time())
            .expect("request");
        let value = serde_json::to_value(&request).expect("json");
        let object = value.as_object().expect("object");

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "address",
                "email",
                "name",
                "orderDate",
                "phone",
                "product",
                "quantity",
                "totalPrice"
            ]
        );
        assert_eq!(object["totalPrice"], "299");
        assert_eq!(object["quantity"], 1);
    }
}
