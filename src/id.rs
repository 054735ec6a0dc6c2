use rand::Rng;

/// Length of the random part of every generated identifier.
pub const TOKEN_LENGTH: usize = 16;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// URL-safe random token of `length` characters.
fn random_token(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generate a fresh identifier such as `album-V1StGXR8_Z5jdHi6`.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, random_token(TOKEN_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("album");
        let token = id.strip_prefix("album-").unwrap();

        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_id_is_random() {
        assert_ne!(generate_id("song"), generate_id("song"));
    }
}
