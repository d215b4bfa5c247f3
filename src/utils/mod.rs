pub mod url_validator;

/// 短码字母表（字母 + 数字，URL 安全）
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字
    iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// 将 64 位整数编码为定长 base62 字符串
///
/// 不足 `width` 位时左侧补 `ALPHABET[0]`，超出时保留低位。
pub fn encode_base62(mut value: u64, width: usize) -> String {
    let mut digits = Vec::with_capacity(width.max(11));
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.truncate(width);
    while digits.len() < width {
        digits.push(ALPHABET[0]);
    }
    digits.reverse();
    // ALPHABET 只包含 ASCII
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_code_length_and_charset() {
        let code = generate_random_code(12);
        assert_eq!(code.len(), 12);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_code_zero_length() {
        assert!(generate_random_code(0).is_empty());
    }

    #[test]
    fn test_base62_known_values() {
        assert_eq!(encode_base62(0, 3), "AAA");
        assert_eq!(encode_base62(1, 3), "AAB");
        assert_eq!(encode_base62(61, 2), "A9");
        assert_eq!(encode_base62(62, 2), "BA");
    }

    #[test]
    fn test_base62_keeps_low_digits() {
        // 62^2 + 5 -> "BAF"，截断到两位只保留低位 "AF"
        assert_eq!(encode_base62(62 * 62 + 5, 3), "BAF");
        assert_eq!(encode_base62(62 * 62 + 5, 2), "AF");
    }

    #[test]
    fn test_base62_fixed_width_for_large_values() {
        for value in [u64::MAX, u64::MAX / 3, 1 << 40] {
            assert_eq!(encode_base62(value, 7).len(), 7);
        }
        assert_eq!(encode_base62(u64::MAX, 11), "V8qRkBGKRiP");
        assert_eq!(encode_base62(u64::MAX, 13), "AAV8qRkBGKRiP");
    }
}
