use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform JSON wrapper returned by every endpoint.
///
/// `errors` carries the raw error text of a failed request and is omitted
/// on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T = serde_json::Value> {
    pub status: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self { status: true, message: message.into(), errors: Vec::new(), data }
    }

    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        let errors = if error.is_empty() { Vec::new() } else { vec![error] };
        Self { status: false, message: message.into(), errors, data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_errors() {
        let env = Envelope::success("SUCCESS", Some(json!({"id": 1})));
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v, json!({"status": true, "message": "SUCCESS", "data": {"id": 1}}));
    }

    #[test]
    fn error_carries_raw_text() {
        let env: Envelope = Envelope::error("Invalid OTP", "otp rejected");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["status"], json!(false));
        assert_eq!(v["errors"], json!(["otp rejected"]));
        assert_eq!(v["data"], serde_json::Value::Null);
    }
}
