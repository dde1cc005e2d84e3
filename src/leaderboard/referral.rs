//! Referral codes
//!
//! A referral code is just the referrer's own address, lowercased. It arrives
//! on the app's entry URL as a `ref` query parameter and is consumed after one
//! successful submission. Malformed values degrade to "no referrer" rather
//! than erroring.

use super::client::Address;

/// The referral code an identity hands out: its own address, lowercased.
pub fn referral_code(address: &Address) -> String {
    // Addresses are already normalized to lowercase at parse time
    address.as_str().to_string()
}

/// Extract a referrer from an entry-URL query string (the part after `?`).
///
/// Returns `None` when the `ref` parameter is absent or not a well-formed
/// address; callers map `None` to the zero address.
pub fn parse_referral_query(query: &str) -> Option<Address> {
    let raw = query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("ref="))?;
    Address::parse(raw).ok()
}
