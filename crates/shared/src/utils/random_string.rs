use anyhow::Result;
use chrono::Utc;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const CHARACTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn generate_random_string(length: usize) -> Result<String> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    let mut rng = StdRng::from_seed(seed);

    let s = (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARACTERS.len());
            CHARACTERS[idx] as char
        })
        .collect();

    Ok(s)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    String::from_utf8_lossy(&digits).into_owned()
}

/// Scannable ticket code: `TKT-<millis base36>-<16 random alphanumerics>`.
pub fn generate_ticket_code() -> Result<String> {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix = generate_random_string(16)?;

    Ok(format!("TKT-{}-{}", to_base36(millis), suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn ticket_codes_have_expected_shape() {
        let code = generate_ticket_code().unwrap();
        let parts: Vec<&str> = code.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TKT");
        assert_eq!(parts[2].len(), 16);
    }

    #[test]
    fn ticket_codes_do_not_repeat() {
        let codes: HashSet<String> = (0..2_000)
            .map(|_| generate_ticket_code().unwrap())
            .collect();
        assert_eq!(codes.len(), 2_000);
    }
}
