use std::str::FromStr;

use alloy_primitives::Address;

/// Parses an address the way wallets actually hand them over: 40 hex digits
/// with an optional `0x` prefix, either uniformly cased or EIP-55 mixed case.
/// Mixed-case input must carry a valid checksum.
pub fn parse_address(input: &str) -> Result<Address, String> {
    let trimmed = input.trim();
    let address = Address::from_str(trimmed)
        .map_err(|_| format!("'{}' is not a well-formed address", trimmed))?;

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower {
        let checksummed = address.to_checksum(None);
        if checksummed.trim_start_matches("0x") != digits {
            return Err(format!("'{}' fails EIP-55 checksum validation", trimmed));
        }
    }
    Ok(address)
}
