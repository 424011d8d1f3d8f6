//! Verification ID minting.

use rand::Rng;

/// Alphabet for the random suffix. Matches base36 digits, uppercased.
const BASE36_UPPER: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 4;

/// Mints a verification ID of the form `AUTH-<unix millis>-<4 base36 chars>`.
///
/// IDs are unique per call in practice (millisecond timestamp plus a random
/// suffix); collisions are not formally prevented.
pub fn mint_verification_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())] as char)
        .collect();
    format!("AUTH-{}-{}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = mint_verification_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "AUTH");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_differ() {
        // Same millisecond is likely here, so the random suffix carries
        // the uniqueness.
        let ids: Vec<String> = (0..50).map(|_| mint_verification_id()).collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert!(unique.len() > 1);
    }
}
