//! Canonical JSON: object keys sorted byte-wise, no insignificant whitespace.

use serde_json::Value;

use crate::errors::CryptoError;

pub fn canonical_json_string(value: &Value) -> Result<String, CryptoError> {
    let mut out = String::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut String) -> Result<(), CryptoError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(num) => out.push_str(&num.to_string()),
        Value::String(s) => write_str(s, out)?,
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_value(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (idx, (key, value)) in entries.into_iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_str(key, out)?;
                out.push(':');
                write_value(value, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_str(s: &str, out: &mut String) -> Result<(), CryptoError> {
    let escaped = serde_json::to_string(s)
        .map_err(|err| CryptoError::serialization(&format!("string escaping failed: {err}")))?;
    out.push_str(&escaped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::canonical_json_string;
    use serde_json::json;

    #[test]
    fn canonical_json_is_stable_across_key_order() {
        let a = json!({"b":2,"a":1,"c":{"y":1,"x":2},"arr":[3,2,1]});
        let b = json!({"c":{"x":2,"y":1},"a":1,"arr":[3,2,1],"b":2});
        assert_eq!(
            canonical_json_string(&a).unwrap(),
            canonical_json_string(&b).unwrap()
        );
        assert_eq!(
            canonical_json_string(&a).unwrap(),
            r#"{"a":1,"arr":[3,2,1],"b":2,"c":{"x":2,"y":1}}"#
        );
    }

    #[test]
    fn floats_and_escapes_are_kept() {
        let v = json!({"price": 1.5, "note": "a\"b"});
        assert_eq!(
            canonical_json_string(&v).unwrap(),
            r#"{"note":"a\"b","price":1.5}"#
        );
    }
}
