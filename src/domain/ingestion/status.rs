//! Payment status classification.
//!
//! Lojou reports several spellings for a settled payment. Any status in
//! the accepted set (compared case-insensitively) qualifies the event for
//! persistence; everything else is acknowledged and ignored.

/// Platform statuses that mean the payment went through.
pub const ACCEPTED_STATUSES: [&str; 11] = [
    "approved",
    "paid",
    "completed",
    "finalized",
    "success",
    "confirmed",
    "complete",
    "processed",
    "settled",
    "captured",
    "accepted",
];

/// Result of classifying an event's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusClass {
    /// Status is in the accepted set. Holds the normalized form.
    Accepted(String),
    /// Status is unknown, empty, or absent. Holds the reported value.
    Ignored(Option<String>),
}

impl StatusClass {
    /// Classify a reported status.
    pub fn of(status: Option<&str>) -> Self {
        match status {
            Some(raw) => {
                let normalized = raw.to_lowercase();
                if ACCEPTED_STATUSES.contains(&normalized.as_str()) {
                    StatusClass::Accepted(normalized)
                } else {
                    StatusClass::Ignored(Some(raw.to_string()))
                }
            }
            None => StatusClass::Ignored(None),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, StatusClass::Accepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_accepted_status_is_accepted() {
        for status in ACCEPTED_STATUSES {
            assert!(StatusClass::of(Some(status)).is_accepted(), "{status} should be accepted");
        }
    }

    #[test]
    fn classification_ignores_case() {
        for status in ["APPROVED", "Approved", "approved", "pAiD"] {
            assert!(StatusClass::of(Some(status)).is_accepted());
        }
    }

    #[test]
    fn accepted_status_is_normalized() {
        assert_eq!(
            StatusClass::of(Some("Approved")),
            StatusClass::Accepted("approved".to_string())
        );
    }

    #[test]
    fn non_qualifying_statuses_are_ignored() {
        for status in ["pending", "refused", "", "refunded", "chargeback"] {
            assert_eq!(
                StatusClass::of(Some(status)),
                StatusClass::Ignored(Some(status.to_string()))
            );
        }
    }

    #[test]
    fn missing_status_is_ignored() {
        assert_eq!(StatusClass::of(None), StatusClass::Ignored(None));
    }

    #[test]
    fn surrounding_whitespace_is_not_trimmed() {
        assert!(!StatusClass::of(Some(" approved")).is_accepted());
    }

    proptest! {
        #[test]
        fn any_casing_of_an_accepted_status_is_accepted(
            index in 0..ACCEPTED_STATUSES.len(),
            mask in proptest::collection::vec(any::<bool>(), 16),
        ) {
            let status: String = ACCEPTED_STATUSES[index]
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert!(StatusClass::of(Some(&status)).is_accepted());
        }

        #[test]
        fn strings_outside_the_set_are_ignored(status in "[a-z]{1,12}") {
            prop_assume!(!ACCEPTED_STATUSES.contains(&status.as_str()));
            prop_assert!(!StatusClass::of(Some(&status)).is_accepted());
        }
    }
}
