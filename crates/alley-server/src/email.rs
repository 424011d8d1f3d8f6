//! Mock email delivery for verification OTPs.
//!
//! Development stand-in: the OTP is written to the log instead of being
//! sent. A production deployment would swap this for a real provider.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// OTP validity window.
const OTP_TTL_MINUTES: i64 = 10;

pub struct EmailService;

impl EmailService {
    /// Six-digit numeric one-time passcode.
    pub fn generate_otp(&self) -> String {
        rand::thread_rng().gen_range(100_000..1_000_000).to_string()
    }

    /// Expiry timestamp for an OTP minted now.
    pub fn otp_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::minutes(OTP_TTL_MINUTES)
    }

    /// "Sends" the OTP by logging it.
    pub fn send_otp(&self, email: &str, otp: &str) {
        tracing::info!(%email, %otp, "email OTP (mock delivery)");
    }

    /// Checks a supplied OTP against the stored code and expiry.
    pub fn is_otp_valid(
        &self,
        supplied: &str,
        stored: Option<&str>,
        expiry: Option<DateTime<Utc>>,
    ) -> bool {
        match (stored, expiry) {
            (Some(stored), Some(expiry)) => {
                !supplied.is_empty() && supplied == stored && Utc::now() <= expiry
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_six_digits() {
        let service = EmailService;
        for _ in 0..100 {
            let otp = service.generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_otp_validation() {
        let service = EmailService;
        let future = Utc::now() + Duration::minutes(5);
        let past = Utc::now() - Duration::minutes(5);

        assert!(service.is_otp_valid("123456", Some("123456"), Some(future)));
        assert!(!service.is_otp_valid("123456", Some("654321"), Some(future)));
        assert!(!service.is_otp_valid("123456", Some("123456"), Some(past)));
        assert!(!service.is_otp_valid("123456", None, Some(future)));
        assert!(!service.is_otp_valid("123456", Some("123456"), None));
        assert!(!service.is_otp_valid("", Some(""), Some(future)));
    }
}
