// src/shopify/gid.rs
// Shopify global identifiers come in three shapes depending on API version:
// a bare numeric id, a `gid://shopify/Type/123` URI, or the legacy
// base64-encoded form of that URI. All of them decode to the trailing
// numeric segment.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Extract the numeric id from a Shopify GID string.
pub fn gid_to_id(gid: &str) -> String {
    if !gid.is_empty() && gid.bytes().all(|b| b.is_ascii_digit()) {
        return gid.to_string();
    }

    let decoded = match BASE64.decode(gid) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| gid.to_string()),
        Err(_) => gid.to_string(),
    };

    match decoded.rsplit_once('/') {
        Some((_, id)) => id.to_string(),
        None => decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numeric_id_passes_through() {
        assert_eq!(gid_to_id("123456789"), "123456789");
    }

    #[test]
    fn test_gid_uri_yields_trailing_segment() {
        assert_eq!(gid_to_id("gid://shopify/ProductVariant/42"), "42");
        assert_eq!(gid_to_id("gid://shopify/InventoryItem/987654"), "987654");
    }

    #[test]
    fn test_base64_encoded_gid_is_decoded_first() {
        // base64("gid://shopify/Location/555")
        let encoded = BASE64.encode("gid://shopify/Location/555");
        assert_eq!(gid_to_id(&encoded), "555");
    }

    #[test]
    fn test_opaque_string_without_path_is_returned_as_is() {
        assert_eq!(gid_to_id("not-a-gid"), "not-a-gid");
    }
}
