#![forbid(unsafe_code)]

use crate::McpServer;
use serde_json::{Value, json};
use st_core::{ThoughtInput, ThoughtResponse};
use std::panic::{AssertUnwindSafe, catch_unwind};

pub(crate) const SEQUENTIAL_THINKING_TOOL: &str = "sequentialthinking";

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![json!({
        "name": SEQUENTIAL_THINKING_TOOL,
        "description": "Record one step of a multi-step reasoning session. Steps may revise an earlier step (isRevision + revisesThought) or fork an alternative line of reasoning (branchFromThought + branchId). totalThoughts is an estimate and is raised automatically when thoughtNumber exceeds it. Returns the progress summary: thoughtNumber, totalThoughts, nextThoughtNeeded, known branches and thoughtHistoryLength.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "thought": { "type": "string", "description": "The current thinking step" },
                "nextThoughtNeeded": { "type": "boolean", "description": "Whether another step follows" },
                "thoughtNumber": { "type": "integer", "minimum": 1 },
                "totalThoughts": { "type": "integer", "minimum": 1 },
                "isRevision": { "type": "boolean" },
                "revisesThought": { "type": "integer", "minimum": 1 },
                "branchFromThought": { "type": "integer", "minimum": 1 },
                "branchId": { "type": "string" },
                "needsMoreThoughts": { "type": "boolean" }
            },
            "required": ["thought", "nextThoughtNeeded", "thoughtNumber", "totalThoughts"]
        }
    })]
}

impl McpServer {
    /// `Err` carries a JSON-RPC invalid-params message; tool-level failures are `Ok` results
    /// flagged with `isError`.
    pub(super) fn call_tool(&self, params: Option<Value>) -> Result<Value, String> {
        let Some(Value::Object(mut params)) = params else {
            return Err("Invalid params: expected an object".to_string());
        };
        let Some(name) = params.get("name").and_then(|v| v.as_str()).map(str::to_string) else {
            return Err("Invalid params: missing tool name".to_string());
        };
        let arguments = params
            .remove("arguments")
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        match name.as_str() {
            SEQUENTIAL_THINKING_TOOL => Ok(self.tool_sequential_thinking(arguments)),
            _ => Err(format!("Unknown tool: {name}")),
        }
    }

    fn tool_sequential_thinking(&self, arguments: Value) -> Value {
        let input: ThoughtInput = match serde_json::from_value(arguments) {
            Ok(v) => v,
            Err(err) => return tool_error(&format!("invalid arguments: {err}")),
        };

        let engine = &self.engine;
        match catch_unwind(AssertUnwindSafe(|| engine.process_thought(input))) {
            Ok(Ok(response)) => tool_ok(&response),
            Ok(Err(err)) => tool_error(&err.to_string()),
            Err(_) => {
                tracing::error!("thought processing panicked");
                tool_error("processing error: internal fault")
            }
        }
    }
}

fn text_content(payload: &Value, is_error: bool) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
        }],
        "isError": is_error
    })
}

fn tool_ok(response: &ThoughtResponse) -> Value {
    let payload = serde_json::to_value(response).unwrap_or(Value::Null);
    text_content(&payload, false)
}

fn tool_error(message: &str) -> Value {
    text_content(&json!({ "error": message, "status": "failed" }), true)
}
