use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

// ASCII digits only; `\d` would also accept other Unicode decimal digits.
static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("dotted-quad pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("'{0}' is not four dot-separated groups of 1-3 digits")]
    Malformed(String),
    #[error("octet {octet} in '{input}' is above 255")]
    OctetOutOfRange { input: String, octet: u16 },
}

/// Parse an operator-entered IPv4 address.
///
/// Accepts exactly four `.`-separated groups of one to three digits, each at
/// most 255. Leading zeros are allowed (`010` reads as 10), unlike
/// [`Ipv4Addr`]'s own `FromStr`.
pub fn parse_address(input: &str) -> Result<Ipv4Addr, AddressError> {
    if !DOTTED_QUAD.is_match(input) {
        return Err(AddressError::Malformed(input.to_string()));
    }

    let mut octets = [0u8; 4];
    for (slot, group) in octets.iter_mut().zip(input.split('.')) {
        let value: u16 = group
            .parse()
            .map_err(|_| AddressError::Malformed(input.to_string()))?;
        *slot = u8::try_from(value).map_err(|_| AddressError::OctetOutOfRange {
            input: input.to_string(),
            octet: value,
        })?;
    }
    Ok(Ipv4Addr::from(octets))
}

/// True when `input` is a dotted quad with every octet in 0..=255.
pub fn validate_address(input: &str) -> bool {
    parse_address(input).is_ok()
}
