//! String formatting utilities for hex values in logs and CLI output.

/// Shortens a hex string for display: `0x1234abcd..` for anything longer than
/// ten characters.
pub fn truncate_hex(hex_str: &str) -> String {
	if hex_str.len() <= 10 {
		hex_str.to_string()
	} else {
		format!("{}..", &hex_str[..10])
	}
}

/// Strips a leading "0x" or "0X" if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_strip_prefix() {
		assert_eq!(without_0x_prefix("0xabcd"), "abcd");
		assert_eq!(without_0x_prefix("0Xabcd"), "abcd");
		assert_eq!(without_0x_prefix("abcd"), "abcd");
	}

	#[test]
	fn test_truncate_hex() {
		assert_eq!(truncate_hex("0x1234"), "0x1234");
		assert_eq!(
			truncate_hex("0x1234567890abcdef1234567890abcdef12345678"),
			"0x12345678.."
		);
	}
}
