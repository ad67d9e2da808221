#![forbid(unsafe_code)]

use serde::Deserialize;
use serde_json::{Value, json};

pub(crate) const PARSE_ERROR: i64 = -32700;
pub(crate) const INVALID_REQUEST: i64 = -32600;
pub(crate) const METHOD_NOT_FOUND: i64 = -32601;
pub(crate) const INVALID_PARAMS: i64 = -32602;
pub(crate) const SERVER_NOT_INITIALIZED: i64 = -32002;

/// An incoming call. The `jsonrpc` marker is not checked; clients omitting it are served.
#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcRequest {
    pub(crate) method: String,
    #[serde(default)]
    pub(crate) id: Option<Value>,
    #[serde(default)]
    pub(crate) params: Option<Value>,
}

impl JsonRpcRequest {
    /// Notifications (no id, or a null id) never get a reply.
    pub(crate) fn expects_response(&self) -> bool {
        !matches!(self.id, None | Some(Value::Null))
    }

    pub(crate) fn param_str(&self, key: &str) -> Option<&str> {
        self.params.as_ref()?.get(key)?.as_str()
    }
}

pub(crate) fn json_rpc_response(id: Option<Value>, result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub(crate) fn json_rpc_error(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw: Value) -> JsonRpcRequest {
        serde_json::from_value(raw).expect("request")
    }

    #[test]
    fn null_or_missing_id_is_a_notification() {
        assert!(!request(json!({ "method": "ping" })).expects_response());
        assert!(!request(json!({ "method": "ping", "id": null })).expects_response());
        assert!(request(json!({ "method": "ping", "id": 0 })).expects_response());
        assert!(request(json!({ "method": "ping", "id": "a" })).expects_response());
    }

    #[test]
    fn reads_string_params() {
        let req = request(json!({
            "method": "initialize",
            "id": 1,
            "params": { "protocolVersion": "2025-03-26", "n": 3 }
        }));
        assert_eq!(req.param_str("protocolVersion"), Some("2025-03-26"));
        assert_eq!(req.param_str("n"), None);
        assert_eq!(request(json!({ "method": "x" })).param_str("n"), None);
    }
}
