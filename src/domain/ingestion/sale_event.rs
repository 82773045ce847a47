//! Sale event payload received from the Lojou platform.
//!
//! The platform sends an informal JSON object; no schema is enforced. Fields
//! are extracted leniently and anything unrecognised is kept only in the
//! audit log.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::foundation::ExternalId;

use super::{IngestError, StatusClass};

/// Placeholder used when the event carries no product name.
pub const DEFAULT_PRODUCT_NAME: &str = "Produto";

/// Placeholder used when the event carries no customer email.
pub const DEFAULT_CUSTOMER_EMAIL: &str = "Cliente";

/// Decimal places the `sales.amount` column keeps.
pub const AMOUNT_SCALE: u32 = 2;

/// Amounts must stay below this many units (`NUMERIC(14, 2)`).
const AMOUNT_UNITS_LIMIT: i64 = 1_000_000_000_000;

/// A parsed sale event.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleEvent {
    payload: Value,
}

impl SaleEvent {
    /// Parses a raw request body.
    ///
    /// Any valid JSON is accepted. A top-level value that is not an object
    /// simply yields no fields.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MalformedPayload` if the body is not JSON.
    pub fn parse(body: &[u8]) -> Result<Self, IngestError> {
        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| IngestError::MalformedPayload(e.to_string()))?;
        Ok(Self { payload })
    }

    /// Wraps an already-parsed payload.
    pub fn from_value(payload: Value) -> Self {
        Self { payload }
    }

    /// The payload as received.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Reported status, if it is a string.
    pub fn status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status())
    }

    /// The sale amount, coerced from a JSON number or a numeric string.
    ///
    /// The amount must be positive, carry at most [`AMOUNT_SCALE`] decimal
    /// places and fit the stored column, so what is stored is exactly what
    /// the owner is notified of.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidAmount` if the amount is absent, not
    /// numeric, or outside those bounds.
    pub fn amount(&self) -> Result<Decimal, IngestError> {
        let amount = match self.payload.get("amount") {
            None | Some(Value::Null) => {
                return Err(IngestError::InvalidAmount("amount is missing".to_string()))
            }
            Some(value) => coerce_amount(value).ok_or_else(|| {
                IngestError::InvalidAmount(format!("amount is not numeric: {}", value))
            })?,
        };

        if amount <= Decimal::ZERO {
            return Err(IngestError::InvalidAmount(format!(
                "amount must be positive: {}",
                amount
            )));
        }
        if amount.normalize().scale() > AMOUNT_SCALE {
            return Err(IngestError::InvalidAmount(format!(
                "amount has more than {} decimal places: {}",
                AMOUNT_SCALE, amount
            )));
        }
        if amount >= Decimal::from(AMOUNT_UNITS_LIMIT) {
            return Err(IngestError::InvalidAmount(format!(
                "amount is too large: {}",
                amount
            )));
        }
        Ok(amount)
    }

    /// `product.name`, or the placeholder.
    pub fn product_name(&self) -> &str {
        non_empty_str(self.payload.pointer("/product/name")).unwrap_or(DEFAULT_PRODUCT_NAME)
    }

    /// `customer.email`, or the placeholder.
    pub fn customer_email(&self) -> &str {
        non_empty_str(self.payload.pointer("/customer/email")).unwrap_or(DEFAULT_CUSTOMER_EMAIL)
    }

    /// Deduplication key: `order_number`, else `transaction_id`.
    ///
    /// Empty strings count as absent. Numeric identifiers are rendered as
    /// strings.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidExternalId` if the key lies in the
    /// namespace reserved for reversals.
    pub fn external_id(&self) -> Result<Option<ExternalId>, IngestError> {
        let id = ["order_number", "transaction_id"]
            .iter()
            .filter_map(|field| identifier(self.payload.get(*field)))
            .find_map(|id| ExternalId::new(id).ok());

        match id {
            Some(id) if id.is_reserved() => Err(IngestError::InvalidExternalId(format!(
                "{} is reserved for reversals",
                id
            ))),
            id => Ok(id),
        }
    }

    /// Description stored on the Sale.
    pub fn description(&self) -> String {
        format!(
            "Venda Lojou: {} ({})",
            self.product_name(),
            self.customer_email()
        )
    }
}

/// Coerces a JSON number or numeric string into an exact decimal.
///
/// Strings are trimmed; scientific notation is accepted. Booleans,
/// empty strings and non-numeric text yield `None`.
pub fn coerce_amount(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn event(payload: Value) -> SaleEvent {
        SaleEvent::from_value(payload)
    }

    // ══════════════════════════════════════════════════════════════
    // Parsing
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_rejects_non_json() {
        let result = SaleEvent::parse(b"{not json");
        assert!(matches!(result, Err(IngestError::MalformedPayload(_))));
    }

    #[test]
    fn parse_rejects_empty_body() {
        assert!(matches!(SaleEvent::parse(b""), Err(IngestError::MalformedPayload(_))));
    }

    #[test]
    fn parse_accepts_non_object_json_without_fields() {
        let event = SaleEvent::parse(b"[1, 2, 3]").unwrap();
        assert_eq!(event.status(), None);
        assert_eq!(event.external_id().unwrap(), None);
    }

    #[test]
    fn non_string_status_is_treated_as_absent() {
        let event = event(json!({"status": 200}));
        assert_eq!(event.status(), None);
        assert!(!event.status_class().is_accepted());
    }

    // ══════════════════════════════════════════════════════════════
    // Amount coercion
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn string_amount_is_coerced_exactly() {
        let amount = event(json!({"amount": "1500.00"})).amount().unwrap();
        assert_eq!(amount, Decimal::from_str("1500.00").unwrap());
        assert_eq!(amount.to_string(), "1500.00");
    }

    #[test]
    fn numeric_amount_is_accepted() {
        let amount = event(json!({"amount": 250})).amount().unwrap();
        assert_eq!(amount, Decimal::from(250));
    }

    #[test]
    fn fractional_numeric_amount_is_accepted() {
        let amount = event(json!({"amount": 99.9})).amount().unwrap();
        assert_eq!(amount, Decimal::from_str("99.9").unwrap());
    }

    #[test]
    fn padded_string_amount_is_trimmed() {
        let amount = event(json!({"amount": " 42.5 "})).amount().unwrap();
        assert_eq!(amount, Decimal::from_str("42.5").unwrap());
    }

    #[test]
    fn scientific_string_amount_is_accepted() {
        let amount = event(json!({"amount": "1e3"})).amount().unwrap();
        assert_eq!(amount, Decimal::from(1000));
    }

    #[test]
    fn missing_amount_is_invalid() {
        assert!(matches!(
            event(json!({"status": "paid"})).amount(),
            Err(IngestError::InvalidAmount(_))
        ));
    }

    #[test]
    fn non_numeric_amounts_are_invalid() {
        for amount in [json!("abc"), json!(""), json!(true), json!({"value": 1}), json!(null)] {
            assert!(
                matches!(event(json!({"amount": amount})).amount(), Err(IngestError::InvalidAmount(_))),
                "{} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn non_positive_amounts_are_invalid() {
        for amount in [json!(-250), json!("0"), json!(0), json!("-0.01")] {
            assert!(
                matches!(event(json!({"amount": amount})).amount(), Err(IngestError::InvalidAmount(_))),
                "{} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn sub_cent_amount_is_invalid() {
        let err = event(json!({"amount": "99.999"})).amount().unwrap_err();
        assert!(err.to_string().contains("decimal places"), "{}", err);
    }

    #[test]
    fn trailing_zeros_beyond_cents_are_accepted() {
        let amount = event(json!({"amount": "99.900"})).amount().unwrap();
        assert_eq!(amount, Decimal::from_str("99.9").unwrap());
    }

    #[test]
    fn amount_beyond_column_range_is_invalid() {
        for amount in [json!(1e20), json!("1000000000000"), json!("1e12")] {
            assert!(
                matches!(event(json!({"amount": amount})).amount(), Err(IngestError::InvalidAmount(_))),
                "{} should be rejected",
                amount
            );
        }
    }

    #[test]
    fn largest_column_amount_is_accepted() {
        let amount = event(json!({"amount": "999999999999.99"})).amount().unwrap();
        assert_eq!(amount.to_string(), "999999999999.99");
    }

    // ══════════════════════════════════════════════════════════════
    // Identifiers and description
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn order_number_wins_over_transaction_id() {
        let event = event(json!({"order_number": "ORD-1", "transaction_id": "TRX-1"}));
        assert_eq!(event.external_id().unwrap().unwrap().as_str(), "ORD-1");
    }

    #[test]
    fn transaction_id_used_when_order_number_empty() {
        let event = event(json!({"order_number": "", "transaction_id": "TRX-1"}));
        assert_eq!(event.external_id().unwrap().unwrap().as_str(), "TRX-1");
    }

    #[test]
    fn numeric_order_number_is_rendered_as_string() {
        let event = event(json!({"order_number": 123456}));
        assert_eq!(event.external_id().unwrap().unwrap().as_str(), "123456");
    }

    #[test]
    fn reserved_reversal_identifier_is_rejected() {
        let event = event(json!({
            "order_number": "reversal:550e8400-e29b-41d4-a716-446655440000"
        }));
        assert!(matches!(
            event.external_id(),
            Err(IngestError::InvalidExternalId(_))
        ));
    }

    #[test]
    fn no_identifier_yields_none() {
        assert_eq!(event(json!({"status": "paid"})).external_id().unwrap(), None);
    }

    #[test]
    fn description_uses_product_and_email() {
        let event = event(json!({
            "product": {"name": "Curso X"},
            "customer": {"email": "a@b.com"}
        }));
        assert_eq!(event.description(), "Venda Lojou: Curso X (a@b.com)");
    }

    #[test]
    fn description_defaults_missing_fields() {
        let event = event(json!({"product": {"name": ""}}));
        assert_eq!(event.description(), "Venda Lojou: Produto (Cliente)");
    }

    proptest! {
        #[test]
        fn two_decimal_strings_survive_coercion(units in 0i64..10_000_000, cents in 0u32..100) {
            let text = format!("{}.{:02}", units, cents);
            let coerced = coerce_amount(&Value::String(text.clone()));
            prop_assert_eq!(coerced.map(|d| d.to_string()), Some(text));
        }
    }
}
