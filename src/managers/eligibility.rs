use crate::errors::AdviceError;
use crate::services::dispatch::ActionHandler;
use crate::services::eligibility::{
    current_two_digit_year, EligibilityService, EligibilityStatus, RegisterNumber,
};
use crate::services::logger::Logger;
use crate::services::suggest::SuggestService;
use crate::stores::data_store::DataStore;
use crate::utils::tool_errors::unknown_action_error;
use serde_json::Value;
use std::sync::Arc;

const ELIGIBILITY_ACTIONS: &[&str] = &["eligibility_check", "autocomplete"];

#[derive(Clone)]
pub struct EligibilityManager {
    logger: Logger,
    store: Arc<DataStore>,
    eligibility: Arc<EligibilityService>,
    suggester: Arc<SuggestService>,
}

impl EligibilityManager {
    pub fn new(
        logger: Logger,
        store: Arc<DataStore>,
        eligibility: Arc<EligibilityService>,
        suggester: Arc<SuggestService>,
    ) -> Self {
        Self {
            logger: logger.child("eligibility"),
            store,
            eligibility,
            suggester,
        }
    }

    fn student_profile(&self, reg_no: &str) -> Result<Value, AdviceError> {
        let register = RegisterNumber::parse(reg_no)?;
        Ok(serde_json::json!({
            "reg_no": register.raw(),
            "department": register.department_name().unwrap_or("Unknown Department"),
            "student_year": register.year_of_study(current_two_digit_year()),
            "regulation": register.regulation().as_str(),
        }))
    }

    fn check(&self, args: &Value) -> Result<Value, AdviceError> {
        let reg_no = args.get("reg_no").and_then(|v| v.as_str()).unwrap_or("");
        if reg_no.trim().is_empty() {
            return Err(AdviceError::invalid_input(
                "reg_no must be a non-empty string",
            ));
        }
        let course_name = args
            .get("course_name")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        if course_name.is_empty() {
            let mut payload = self.student_profile(reg_no)?;
            if let Some(map) = payload.as_object_mut() {
                map.insert("success".to_string(), Value::Bool(true));
            }
            return Ok(payload);
        }

        let report = self.eligibility.resolve(reg_no, &course_name)?;
        let mut map = serde_json::Map::new();
        map.insert("success".to_string(), Value::Bool(true));
        map.insert("reg_no".to_string(), Value::String(report.reg_no.clone()));
        map.insert(
            "eligibility".to_string(),
            Value::String(report.status.as_str().to_string()),
        );
        if let Some(department) = report.department.as_ref() {
            map.insert("department".to_string(), Value::String(department.clone()));
        }
        if let Some(regulation) = report.regulation {
            map.insert(
                "regulation".to_string(),
                Value::String(regulation.to_string()),
            );
        }
        if let Some(year) = report.year_of_study.as_ref() {
            map.insert("student_year".to_string(), Value::String(year.clone()));
        }
        if let Some(canonical) = report.matched_canonical.as_ref() {
            map.insert(
                "matched_canonical".to_string(),
                Value::String(canonical.clone()),
            );
        }
        if let Some(best) = report.best_match.as_ref() {
            let best = serde_json::to_value(best)
                .map_err(|err| AdviceError::internal(format!("Failed to serialize match: {}", err)))?;
            map.insert("best_match".to_string(), best);
        }
        if report.status == EligibilityStatus::Eligible {
            let lookup = report.matched_canonical.as_deref().unwrap_or(&course_name);
            if let Some(course) = self.store.online_course(lookup) {
                let course = serde_json::to_value(course).map_err(|err| {
                    AdviceError::internal(format!("Failed to serialize course: {}", err))
                })?;
                map.insert("course_details".to_string(), course);
            }
        }
        Ok(Value::Object(map))
    }

    fn autocomplete(&self, args: &Value) -> Result<Value, AdviceError> {
        let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
        let suggestions = self.suggester.suggest(query)?;
        Ok(serde_json::json!({
            "success": true,
            "query": query.trim(),
            "suggestions": suggestions,
        }))
    }

    pub fn handle_action(&self, args: Value) -> Result<Value, AdviceError> {
        let action = args.get("action");
        match action.and_then(|v| v.as_str()).unwrap_or("") {
            "eligibility_check" => self.check(&args),
            "autocomplete" => self.autocomplete(&args),
            _ => Err(unknown_action_error(
                "eligibility",
                action,
                ELIGIBILITY_ACTIONS,
            )),
        }
    }
}

#[async_trait::async_trait]
impl ActionHandler for EligibilityManager {
    async fn handle(&self, args: Value) -> Result<Value, AdviceError> {
        self.logger.debug("handle_action", args.get("action"));
        self.handle_action(args)
    }
}
