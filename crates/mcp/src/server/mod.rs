#![forbid(unsafe_code)]

mod lifecycle;
mod tools;


use st_storage::ThinkingEngine;
use std::sync::Arc;

pub(crate) struct McpServer {
    initialized: bool,
    engine: Arc<ThinkingEngine>,
}

impl McpServer {
    pub(crate) fn new(engine: Arc<ThinkingEngine>) -> Self {
        Self {
            initialized: false,
            engine,
        }
    }
}
