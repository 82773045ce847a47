//! Shared-secret verification for inbound webhooks.
//!
//! Lojou does not sign its payloads. When a shared secret is configured the
//! platform is expected to send it verbatim in a request header; the value
//! is compared in constant time.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::IngestError;

/// Verifier for the webhook shared secret.
#[derive(Clone)]
pub struct SharedSecretVerifier {
    secret: SecretString,
}

impl SharedSecretVerifier {
    /// Creates a verifier for the given secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Checks the value presented by the caller.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Unauthorized` if the value is absent or differs.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), IngestError> {
        let presented = presented.ok_or(IngestError::Unauthorized)?;
        let expected = self.secret.expose_secret().as_bytes();

        if expected.ct_eq(presented.as_bytes()).unwrap_u8() != 1 {
            return Err(IngestError::Unauthorized);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SharedSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretVerifier")
            .field("secret", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> SharedSecretVerifier {
        SharedSecretVerifier::new(SecretString::new("lojou-s3cret".to_string()))
    }

    #[test]
    fn matching_secret_is_accepted() {
        assert!(verifier().verify(Some("lojou-s3cret")).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert!(matches!(
            verifier().verify(Some("lojou-s3cres")),
            Err(IngestError::Unauthorized)
        ));
    }

    #[test]
    fn prefix_of_secret_is_rejected() {
        assert!(verifier().verify(Some("lojou")).is_err());
    }

    #[test]
    fn missing_secret_is_rejected() {
        assert!(matches!(verifier().verify(None), Err(IngestError::Unauthorized)));
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", verifier());
        assert!(!rendered.contains("lojou-s3cret"));
    }
}
