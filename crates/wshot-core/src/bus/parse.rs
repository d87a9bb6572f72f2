//! Extraction of JSON payloads from GVariant-printed replies.
//!
//! The Window Calls extension returns its results as JSON text wrapped in a
//! GVariant tuple, e.g. `('[{"id": 1, ...}]',)`. Rather than parse GVariant
//! syntax, locate the JSON slice by its outermost brackets and hand it to
//! serde.

use serde_json::Value;

/// Extract and parse the JSON payload embedded in a bus reply.
///
/// Prefers an array payload when both `[` and `{` are present (the window
/// list is an array of objects). Returns `None` when no payload is found or
/// the slice is not valid JSON.
pub fn extract_json(reply: &str) -> Option<Value> {
    let (open, close) = if reply.contains('[') {
        ('[', ']')
    } else {
        ('{', '}')
    };

    let start = reply.find(open)?;
    let end = reply.rfind(close)?;
    if end < start {
        return None;
    }

    serde_json::from_str(&reply[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_array_from_gvariant_tuple() {
        let reply = r#"('[{"id": 100, "wm_class": "firefox"}]',)"#;
        let value = extract_json(reply).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["id"], 100);
        assert_eq!(array[0]["wm_class"], "firefox");
    }

    #[test]
    fn test_extract_object_from_gvariant_tuple() {
        let reply = r#"('{"x": 10, "y": 20, "width": 800, "height": 600}',)"#;
        let value = extract_json(reply).unwrap();
        assert_eq!(value["x"], 10);
        assert_eq!(value["width"], 800);
    }

    #[test]
    fn test_array_preferred_over_object() {
        // Objects nested inside the array must not confuse the bracket scan.
        let reply = r#"('[{"id": 1}, {"id": 2}]',)"#;
        let value = extract_json(reply).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_reply_returns_none() {
        assert!(extract_json("").is_none());
    }

    #[test]
    fn test_no_json_payload_returns_none() {
        assert!(extract_json("(true, '/tmp/shot.png')").is_none());
    }

    #[test]
    fn test_malformed_json_returns_none() {
        assert!(extract_json(r#"('[{"id": }]',)"#).is_none());
    }

    #[test]
    fn test_empty_array_payload() {
        let value = extract_json("('[]',)").unwrap();
        assert!(value.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_brackets_out_of_order_returns_none() {
        assert!(extract_json("] oops [").is_none());
    }
}
