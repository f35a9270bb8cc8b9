use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const RESPONSE_SUCCESS_CODE: i64 = 200;
pub const RESPONSE_SUCCESS_MSG: &str = "success";

/// Standard response wrapper. `data` is always serialised, as `null` when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiRes<T> {
    pub code: i64,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiRes<T> {
    pub fn success(data: T) -> Self {
        Self::custom(RESPONSE_SUCCESS_CODE, Some(data), RESPONSE_SUCCESS_MSG)
    }

    pub fn ok() -> Self {
        Self::custom(RESPONSE_SUCCESS_CODE, None, RESPONSE_SUCCESS_MSG)
    }

    pub fn error(message: impl Into<String>, code: i64) -> Self {
        Self::custom(code, None, message)
    }

    pub fn custom(code: i64, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }
}

#[cfg(feature = "with-axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiRes<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

/// Structural check: an object carrying `code`, `message` and `data`.
pub fn is_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(is_envelope_map)
}

pub fn is_envelope_map(map: &Map<String, Value>) -> bool {
    map.contains_key("code") && map.contains_key("message") && map.contains_key("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detection_is_structural() {
        assert!(is_envelope(&json!({"code": 0, "message": "ok", "data": {"a": 1}})));
        assert!(is_envelope(&json!({"code": 1, "message": "", "data": null, "extra": true})));
        assert!(!is_envelope(&json!({"code": 0, "message": "ok"})));
        assert!(!is_envelope(&json!(["code", "message", "data"])));
        assert!(!is_envelope(&json!("code message data")));
    }

    #[test]
    fn api_res_serialises_into_an_envelope() {
        let ok: ApiRes<Value> = ApiRes::ok();
        assert!(is_envelope(&serde_json::to_value(&ok).unwrap()));

        let res = ApiRes::success(json!({"id": 1}));
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({"code": 200, "message": "success", "data": {"id": 1}})
        );

        let err: ApiRes<Value> = ApiRes::error("boom", 500);
        assert_eq!(err.code, 500);
        assert_eq!(err.data, None);
    }
}
