//! # Partner Transaction Id Derivation
//!
//! The confirm-payment flow requires a partner transaction id built from
//! the biller id and the current wall clock:
//!
//! ```text
//! <billerId><billerId><YYYYMMDDHHMMSS><suffix>
//! ```
//!
//! The id is derived fresh per request and never stored. Two confirms for
//! the same biller within the same second produce the same id; with no
//! persistence or dedup downstream this collision is accepted as-is.

use chrono::{DateTime, Utc};

/// Fixed 6-letter suffix appended to every derived transaction id.
pub const TXN_ID_SUFFIX: &str = "RTPCFM";

/// Derive the partner transaction id for a confirm call at `now`.
pub fn partner_transaction_id(biller_id: &str, now: DateTime<Utc>) -> String {
    format!(
        "{biller_id}{biller_id}{}{TXN_ID_SUFFIX}",
        now.format("%Y%m%d%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_shape() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        let id = partner_transaction_id("123456789012345", at);

        assert_eq!(id, "12345678901234512345678901234520240307090542RTPCFM");
        assert!(id.starts_with("123456789012345"));
        assert!(id.ends_with(TXN_ID_SUFFIX));
    }

    #[test]
    fn test_timestamp_is_fourteen_digits() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let id = partner_transaction_id("0099", at);

        let stamp = &id["0099".len() * 2..id.len() - TXN_ID_SUFFIX.len()];
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(stamp, "20251231235959");
    }

    #[test]
    fn test_same_second_collides() {
        // Documented hazard: sub-second request rates collide.
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            partner_transaction_id("4242", at),
            partner_transaction_id("4242", at)
        );
    }
}
