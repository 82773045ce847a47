//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(Uuid);

impl SaleId {
    /// Creates a new random SaleId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SaleId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SaleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SaleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Account identifier (the dashboard's auth user id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Creates a UserId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned to a sale by the payment platform.
///
/// Used as the deduplication key. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(String);

impl ExternalId {
    /// Creates a new ExternalId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("external_id"));
        }
        Ok(Self(id))
    }

    /// Prefix reserved for reversal ids; platform ids must not use it.
    pub const REVERSAL_PREFIX: &'static str = "reversal:";

    /// External id reserved for the reversal of the given sale.
    pub fn reversal_of(sale_id: &SaleId) -> Self {
        Self(format!("{}{}", Self::REVERSAL_PREFIX, sale_id))
    }

    /// Whether this id lies in the reversal namespace.
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with(Self::REVERSAL_PREFIX)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_id_generates_unique_values() {
        let id1 = SaleId::new();
        let id2 = SaleId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn sale_id_parses_from_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SaleId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn sale_id_serializes_transparently() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SaleId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("a424fb0a-95a8-4c17-9d22-f40f23c2dee4").unwrap();
        assert_eq!(id.as_str(), "a424fb0a-95a8-4c17-9d22-f40f23c2dee4");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        match UserId::new("") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn external_id_rejects_empty_string() {
        assert!(ExternalId::new("").is_err());
    }

    #[test]
    fn reversal_external_id_embeds_sale_id() {
        let sale_id: SaleId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        let id = ExternalId::reversal_of(&sale_id);
        assert_eq!(id.as_str(), "reversal:550e8400-e29b-41d4-a716-446655440000");
        assert!(id.is_reserved());
    }

    #[test]
    fn platform_ids_are_not_reserved() {
        assert!(!ExternalId::new("ORD-1").unwrap().is_reserved());
        assert!(!ExternalId::new("reversal").unwrap().is_reserved());
    }
}
