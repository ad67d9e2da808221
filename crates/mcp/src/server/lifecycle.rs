#![forbid(unsafe_code)]

use crate::{
    INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, METHOD_NOT_FOUND, McpServer, PARSE_ERROR,
    SERVER_NOT_INITIALIZED, json_rpc_error, json_rpc_response,
};
use serde_json::{Value, json};

impl McpServer {
    /// Decodes one message body and dispatches it. `None` for notifications.
    pub(crate) fn handle_raw(&mut self, body: &[u8]) -> Option<Value> {
        let data: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => {
                let message = format!("Parse error: {e}");
                return Some(json_rpc_error(None, PARSE_ERROR, &message));
            }
        };

        let (id, has_method) = match data.as_object() {
            Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
            None => return Some(json_rpc_error(None, INVALID_REQUEST, "Invalid Request")),
        };
        if !has_method {
            return Some(json_rpc_error(id, INVALID_REQUEST, "Invalid Request"));
        }

        match serde_json::from_value::<JsonRpcRequest>(data) {
            Ok(request) => self.handle(request),
            Err(e) => Some(json_rpc_error(
                id,
                INVALID_REQUEST,
                &format!("Invalid Request: {e}"),
            )),
        }
    }

    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        let expects_response = request.expects_response();

        if method == "initialize" {
            let protocol_version = request
                .param_str("protocolVersion")
                .unwrap_or(crate::MCP_VERSION);

            tracing::debug!(protocol_version, "initialize");
            let result = json!({
                "protocolVersion": protocol_version,
                "serverInfo": {
                    "name": crate::SERVER_NAME,
                    "version": crate::SERVER_VERSION
                },
                "capabilities": {
                    "tools": {}
                }
            });
            return Some(json_rpc_response(request.id, result));
        }

        // The MCP notification name and the bare form some clients send.
        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if !self.initialized {
            // Auto-initialize on the first real request to survive client startup races.
            if matches!(method, "tools/call" | "tools/list" | "ping") {
                self.initialized = true;
            } else if expects_response {
                return Some(json_rpc_error(
                    request.id,
                    SERVER_NOT_INITIALIZED,
                    "Server not initialized",
                ));
            } else {
                return None;
            }
        }

        if !expects_response {
            tracing::debug!(method, "ignoring notification");
            return None;
        }

        match method {
            "ping" => Some(json_rpc_response(request.id, json!({}))),
            "resources/list" => Some(json_rpc_response(request.id, json!({ "resources": [] }))),
            "prompts/list" => Some(json_rpc_response(request.id, json!({ "prompts": [] }))),
            "tools/list" => Some(json_rpc_response(
                request.id,
                json!({ "tools": super::tools::tool_definitions() }),
            )),
            "tools/call" => match self.call_tool(request.params) {
                Ok(result) => Some(json_rpc_response(request.id, result)),
                Err(message) => Some(json_rpc_error(request.id, INVALID_PARAMS, &message)),
            },
            _ => Some(json_rpc_error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {method}"),
            )),
        }
    }
}
