use serde::Serialize;

#[derive(Debug)]
pub struct Masked;

pub trait MaskPolicy {
    fn mask(value: &str) -> String;
}

impl MaskPolicy for Masked {
    fn mask(value: &str) -> String {
        let len = value.chars().count();
        if len > 4 {
            let tail: String = value.chars().skip(len - 4).collect();
            "*".repeat(len - 4) + &tail
        } else {
            value.to_string()
        }
    }
}

/// Return true if a key name holds an API credential.
fn is_credential_key(key: &str) -> bool {
    let k = key.to_lowercase();
    matches!(k.as_str(), "pwd" | "signature" | "password" | "subject")
}

/// Return true if a key name holds a checkout token.
fn is_token_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("token")
}

pub fn secure_serializable(v: impl Serialize) -> serde_json::Value {
    let value = serde_json::to_value(v).unwrap_or_default();
    secure_value(&value)
}

/// Masks a raw NVP body (`KEY=VALUE&...`) for logging.
///
/// Bodies that are not form encoded are replaced with a placeholder.
pub fn secure_nvp(body: &str) -> serde_json::Value {
    match serde_urlencoded::from_str::<Vec<(String, String)>>(body) {
        Ok(pairs) => {
            let map = pairs
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            secure_value(&serde_json::Value::Object(map))
        }
        Err(_) => serde_json::Value::String(format!("<{} bytes of non nvp data>", body.len())),
    }
}

pub fn secure_value(v: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match v {
        Value::Object(map) => {
            let mut new = serde_json::Map::with_capacity(map.len());
            for (k, val) in map {
                let is_credential = is_credential_key(k);
                let is_token = is_token_key(k);
                let new_val = match val {
                    Value::String(_) if is_credential => Value::String("***".to_string()),
                    Value::String(s) if is_token => Value::String(Masked::mask(s)),
                    _ => secure_value(val),
                };
                new.insert(k.clone(), new_val);
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(secure_value).collect()),
        other => other.clone(),
    }
}
