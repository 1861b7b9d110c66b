//! Canonical JSON
//!
//! Legacy sign bytes are produced by decoding an encoder's output into a
//! generic value, sorting every object's keys and re-encoding it compactly.
//! Two documents that differ only in key order therefore yield identical
//! bytes. The encoder escapes `<`, `>`, `&`, U+2028 and U+2029 the same way
//! the legacy Go encoder does, so signatures produced there still verify.

use crate::error::CodecError;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use std::io;

/// Recursively rebuild `value` with all object keys in lexicographic order
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonicalize(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        scalar => scalar,
    }
}

/// Compact encoding of an already canonical value
pub fn to_canonical_vec(value: &Value) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, LegacyFormatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Decode arbitrary JSON, sort its keys and re-encode it
pub fn sort_json(bz: &[u8]) -> Result<Vec<u8>, CodecError> {
    let value: Value = serde_json::from_slice(bz)?;
    to_canonical_vec(&canonicalize(value))
}

/// Compact formatter with HTML-safe string escaping
struct LegacyFormatter;

impl Formatter for LegacyFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sort_json_reorders_keys() {
        let sorted = sort_json(br#"{"sequence":1,"account_number":2}"#).unwrap();
        assert_eq!(sorted, br#"{"account_number":2,"sequence":1}"#);
    }

    #[test]
    fn test_sort_json_nested() {
        let input = br#"{"z":{"b":[{"y":1,"x":2}],"a":null},"m":"v"}"#;
        let sorted = sort_json(input).unwrap();
        assert_eq!(sorted, br#"{"m":"v","z":{"a":null,"b":[{"x":2,"y":1}]}}"#);
    }

    #[test]
    fn test_sort_json_strips_whitespace() {
        let sorted = sort_json(b"{ \"b\" : [ 1, 2 ],\n \"a\" : true }").unwrap();
        assert_eq!(sorted, br#"{"a":true,"b":[1,2]}"#);
    }

    #[test]
    fn test_html_characters_escaped() {
        let input = "{\"memo\":\"a<b>&c\u{2028}\u{2029}\"}";
        let sorted = sort_json(input.as_bytes()).unwrap();
        assert_eq!(
            String::from_utf8(sorted).unwrap(),
            r#"{"memo":"a\u003cb\u003e\u0026c\u2028\u2029"}"#
        );
    }

    #[test]
    fn test_control_and_quote_escapes_untouched() {
        let value = serde_json::json!({ "s": "q\"\\\n\u{1}" });
        let bz = to_canonical_vec(&value).unwrap();
        assert_eq!(String::from_utf8(bz).unwrap(), r#"{"s":"q\"\\\n\u0001"}"#);
    }

    #[test]
    fn test_sort_json_rejects_malformed() {
        let err = sort_json(b"{\"a\":").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_arrays_keep_order() {
        let sorted = sort_json(br#"[3,{"b":1,"a":0},1]"#).unwrap();
        assert_eq!(sorted, br#"[3,{"a":0,"b":1},1]"#);
    }

    fn object_with_order(pairs: &[(String, u32)]) -> String {
        let body: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
            .collect();
        format!("{{{}}}", body.join(","))
    }

    proptest! {
        #[test]
        fn prop_key_insertion_order_irrelevant(
            entries in prop::collection::btree_map("[a-z_<&]{1,8}", any::<u32>(), 0..8),
            seed in any::<u64>(),
        ) {
            let forward: Vec<(String, u32)> = entries.clone().into_iter().collect();
            let mut shuffled = forward.clone();
            let len = shuffled.len();
            if len > 1 {
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }

            let a = sort_json(object_with_order(&forward).as_bytes()).unwrap();
            let b = sort_json(object_with_order(&shuffled).as_bytes()).unwrap();
            prop_assert_eq!(&a, &b);

            // sorting is idempotent
            prop_assert_eq!(sort_json(&a).unwrap(), a);
        }
    }
}
