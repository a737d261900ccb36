use crate::errors::AdviceError;
use crate::services::credits::CreditsService;
use crate::services::dispatch::ActionHandler;
use crate::services::logger::Logger;
use crate::utils::tool_errors::unknown_action_error;
use serde_json::Value;
use std::sync::Arc;

const CREDIT_ACTIONS: &[&str] = &["credit_summary", "completed_courses"];

#[derive(Clone)]
pub struct CreditsManager {
    logger: Logger,
    credits: Arc<CreditsService>,
}

impl CreditsManager {
    pub fn new(logger: Logger, credits: Arc<CreditsService>) -> Self {
        Self {
            logger: logger.child("credits"),
            credits,
        }
    }

    fn require_reg_no(args: &Value) -> Result<&str, AdviceError> {
        let reg_no = args.get("reg_no").and_then(|v| v.as_str()).unwrap_or("");
        if reg_no.trim().is_empty() {
            return Err(AdviceError::invalid_input(
                "reg_no must be a non-empty string",
            ));
        }
        Ok(reg_no)
    }

    fn summary(&self, args: &Value) -> Result<Value, AdviceError> {
        let reg_no = Self::require_reg_no(args)?;
        let summary = self.credits.summary(reg_no)?;
        let summary = serde_json::to_value(summary)
            .map_err(|err| AdviceError::internal(format!("Failed to serialize summary: {}", err)))?;
        Ok(serde_json::json!({
            "success": true,
            "summary": summary,
        }))
    }

    fn completed(&self, args: &Value) -> Result<Value, AdviceError> {
        let reg_no = Self::require_reg_no(args)?;
        let category = args.get("category").and_then(|v| v.as_str()).unwrap_or("");
        let courses = self.credits.completed_for_category(reg_no, category)?;
        let courses = serde_json::to_value(courses)
            .map_err(|err| AdviceError::internal(format!("Failed to serialize courses: {}", err)))?;
        Ok(serde_json::json!({
            "success": true,
            "category": category.trim().to_uppercase(),
            "courses": courses,
        }))
    }

    pub fn handle_action(&self, args: Value) -> Result<Value, AdviceError> {
        let action = args.get("action");
        match action.and_then(|v| v.as_str()).unwrap_or("") {
            "credit_summary" => self.summary(&args),
            "completed_courses" => self.completed(&args),
            _ => Err(unknown_action_error("credits", action, CREDIT_ACTIONS)),
        }
    }
}

#[async_trait::async_trait]
impl ActionHandler for CreditsManager {
    async fn handle(&self, args: Value) -> Result<Value, AdviceError> {
        self.logger.debug("handle_action", args.get("action"));
        self.handle_action(args)
    }
}
