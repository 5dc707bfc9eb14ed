//! Per-resource request/response mapping
//!
//! One module per resource family. Each operation validates its request,
//! builds the endpoint path, issues one signed call through the shared
//! executors on [`crate::Client`], and accepts exactly one success status.

pub mod activations;
pub mod contracts;
pub mod deactivations;
pub mod edgekv_access_tokens;
pub mod edgekv_initialize;
pub mod edgekv_items;
pub mod edgekv_namespaces;
pub mod ids;
pub mod resource_tiers;
pub mod secure_tokens;
pub mod versions;

/// Encode query pairs into a `key=value&key=value` string.
pub(crate) fn query_string(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_encodes_values() {
        assert_eq!(query_string(&[("version", "1.2")]), "version=1.2");
        assert_eq!(
            query_string(&[("version", "a b"), ("details", "on")]),
            "version=a+b&details=on"
        );
    }
}
