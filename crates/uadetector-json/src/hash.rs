//! Record digests.
//!
//! A record's digest is the SHA-256 of its canonical JSON text with the
//! `hash` member left out. Canonical text sorts object keys, drops
//! insignificant whitespace and escapes strings the way `serde_json` does, so
//! the digest does not depend on the key order or formatting of the input.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::schema::HASH;
use crate::warnings::{Anomaly, Location, Warnings};

const DIGEST_HEX_LEN: usize = 64;

fn write_str(out: &mut String, s: &str) {
    // Serializing a plain string cannot fail.
    out.push_str(&serde_json::to_string(s).unwrap_or_default());
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_str(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        Value::Object(fields) => write_object(out, fields, None),
    }
}

fn write_object(out: &mut String, fields: &Map<String, Value>, skip: Option<&str>) {
    let mut keys: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|k| Some(*k) != skip)
        .collect();
    keys.sort_unstable();
    out.push('{');
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_str(out, key);
        out.push(':');
        write_canonical(out, &fields[key]);
    }
    out.push('}');
}

/// Canonical JSON text of a record, excluding its `hash` member.
pub fn canonical_record(record: &Map<String, Value>) -> String {
    let mut out = String::new();
    write_object(&mut out, record, Some(HASH));
    out
}

/// Lowercase hex SHA-256 of a record's canonical text.
pub fn record_digest(record: &Map<String, Value>) -> String {
    hex::encode(Sha256::digest(canonical_record(record).as_bytes()))
}

fn is_digest(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Check the embedded hash of one record. Adds at most one warning and never
/// rejects the record.
pub(crate) fn validate_record(
    location: Location,
    record: &Map<String, Value>,
    warnings: &mut Warnings,
) {
    let expected = match record.get(HASH) {
        None => {
            warnings.push(Anomaly::HashMissing { location });
            return;
        }
        Some(Value::String(s)) if is_digest(s) => s,
        Some(other) => {
            let value = match other {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            };
            warnings.push(Anomaly::HashMalformed { location, value });
            return;
        }
    };
    let actual = record_digest(record);
    if *expected != actual {
        warnings.push(Anomaly::HashMismatch {
            location,
            expected: expected.clone(),
            actual,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::AnomalyKind;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn canonical_text_sorts_keys_and_skips_hash() {
        let record = object(json!({
            "name": "Browser",
            "id": 1,
            "hash": "x",
            "tags": ["a", {"z": null, "b": true}]
        }));
        assert_eq!(
            canonical_record(&record),
            r#"{"id":1,"name":"Browser","tags":["a",{"b":true,"z":null}]}"#
        );
    }

    #[test]
    fn canonical_text_escapes_strings_like_serde_json() {
        let record = object(json!({
            "name": "say \"hi\" \\ back\u{1}",
            "family": "b\u{f8}t \u{1F600}",
            "url": ""
        }));
        assert_eq!(
            canonical_record(&record),
            r#"{"family":"bøt 😀","name":"say \"hi\" \\ back\u0001","url":""}"#
        );
    }

    #[test]
    fn digest_is_independent_of_key_order_and_hash() {
        let a = object(json!({"id": 1, "name": "Browser"}));
        let b = object(json!({"name": "Browser", "id": 1, "hash": "ignored"}));
        assert_eq!(record_digest(&a), record_digest(&b));
        assert_eq!(record_digest(&a).len(), DIGEST_HEX_LEN);
        assert_ne!(
            record_digest(&a),
            record_digest(&object(json!({"id": 2, "name": "Browser"})))
        );
    }

    #[test]
    fn digest_matches_known_sha256() {
        // sha256 of `{"id":1,"name":"Browser"}`
        let record = object(json!({"id": 1, "name": "Browser"}));
        assert_eq!(
            hex::encode(Sha256::digest(br#"{"id":1,"name":"Browser"}"#)),
            record_digest(&record)
        );
    }

    #[test]
    fn validation_reports_one_warning_per_record() {
        let location = Location::record("browserTypes", 0);
        let mut good = object(json!({"id": 1, "name": "Browser"}));
        let digest = record_digest(&good);
        good.insert(HASH.to_string(), Value::String(digest));

        let mut warnings = Warnings::new();
        validate_record(location, &good, &mut warnings);
        assert_eq!(warnings.len(), 0);

        validate_record(location, &object(json!({"id": 1})), &mut warnings);
        validate_record(location, &object(json!({"id": 1, "hash": 5})), &mut warnings);
        validate_record(location, &object(json!({"id": 1, "hash": "ABC"})), &mut warnings);
        let mut tampered = good.clone();
        tampered.insert("name".to_string(), json!("Robot"));
        validate_record(location, &tampered, &mut warnings);

        assert_eq!(warnings.kinds(), vec![AnomalyKind::Hash; 4]);
        let messages = warnings.into_messages();
        assert_eq!(messages[0], "browserTypes[0]: hash is missing");
        assert!(messages[1].contains("`5` is not a SHA-256 hex digest"));
        assert!(messages[3].starts_with("browserTypes[0]: hash mismatch"));
    }
}
