use crate::errors::AdviceError;
use crate::services::logger::Logger;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, args: Value) -> Result<Value, AdviceError>;
}

/// Routes a named tool call to its manager.
pub struct Dispatcher {
    logger: Logger,
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl Dispatcher {
    pub fn new(logger: Logger, handlers: HashMap<String, Arc<dyn ActionHandler>>) -> Self {
        Self {
            logger: logger.child("dispatch"),
            handlers,
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn dispatch(&self, tool: &str, args: Value) -> Result<Value, AdviceError> {
        let handler = self.handlers.get(tool).ok_or_else(|| {
            AdviceError::invalid_input(format!("Unknown tool: {}", tool))
                .with_details(serde_json::json!({ "known_tools": self.tool_names() }))
        })?;
        self.logger.debug(
            "dispatch",
            Some(&serde_json::json!({
                "tool": tool,
                "action": args.get("action"),
            })),
        );
        handler.handle(args).await
    }
}
