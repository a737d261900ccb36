use crate::constants::{credits, departments};
use crate::errors::{AdviceError, AdviceErrorKind};
use crate::services::eligibility::{current_two_digit_year, RegisterNumber, Regulation};
use crate::services::logger::Logger;
use crate::stores::data_store::{CurriculumRecord, DataStore};
use crate::utils::text::fold_title;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct CreditSummary {
    pub reg_no: String,
    pub department: Option<String>,
    pub regulation: &'static str,
    pub year_of_study: String,
    pub earned_credits: BTreeMap<String, f64>,
    pub completed_courses: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_credits: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletedCourseDetail {
    pub course_code: String,
    pub course_title: String,
    pub theory_credits: Option<f64>,
    pub practical_credits: Option<f64>,
    pub total_credits: Option<f64>,
}

/// Sums earned credits and groups completed titles per curriculum
/// category. Every known category is present in the output, zero-filled,
/// and TOTAL carries the overall sum.
pub fn earned_by_category(
    completed: &[String],
    curriculum: &[CurriculumRecord],
) -> (BTreeMap<String, f64>, BTreeMap<String, Vec<String>>) {
    let completed: BTreeSet<String> = completed.iter().map(|title| fold_title(title)).collect();

    let mut earned: BTreeMap<String, f64> = BTreeMap::new();
    let mut courses: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in curriculum {
        let title = fold_title(&record.course_title);
        if !completed.contains(&title) {
            continue;
        }
        let category = record.category.trim().to_uppercase();
        *earned.entry(category.clone()).or_insert(0.0) += record.total_credits.unwrap_or(0.0);
        courses.entry(category).or_default().push(title);
    }

    for category in credits::CATEGORIES {
        earned.entry(category.to_string()).or_insert(0.0);
        courses.entry(category.to_string()).or_default();
    }
    let total: f64 = earned
        .iter()
        .filter(|(category, _)| category.as_str() != credits::TOTAL_KEY)
        .map(|(_, value)| value)
        .sum();
    earned.insert(credits::TOTAL_KEY.to_string(), total);

    (earned, courses)
}

#[derive(Clone)]
pub struct CreditsService {
    logger: Logger,
    store: Arc<DataStore>,
}

impl CreditsService {
    pub fn new(logger: Logger, store: Arc<DataStore>) -> Self {
        Self {
            logger: logger.child("credits"),
            store,
        }
    }

    /// Full credit standing for one student: earned credits per category,
    /// completed titles per category, and the department's required
    /// credits when the requirement table is available.
    pub fn summary(&self, reg_no: &str) -> Result<CreditSummary, AdviceError> {
        let register = RegisterNumber::parse(reg_no)?;
        let completed = self.store.completed_courses(register.raw())?;
        let curriculum = self.store.curriculum_for(register.department_code())?;
        let (earned, courses) = earned_by_category(&completed, &curriculum);

        let required = match departments::credit_column(register.department_code()) {
            Some(column) => match self.store.credit_requirements(register.regulation(), column) {
                Ok(required) => Some(required),
                Err(err) if err.kind == AdviceErrorKind::DataUnavailable => {
                    self.logger.warn(
                        "Credit requirements unavailable",
                        Some(&serde_json::json!({
                            "department": register.department_code(),
                            "error": err.message,
                        })),
                    );
                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };

        Ok(CreditSummary {
            reg_no: register.raw().to_string(),
            department: register.department_name().map(str::to_string),
            regulation: register.regulation().as_str(),
            year_of_study: register.year_of_study(current_two_digit_year()),
            earned_credits: earned,
            completed_courses: courses,
            required_credits: required,
        })
    }

    /// Completed-course detail rows for one category, with the course code
    /// column picked by the student's regulation era.
    pub fn completed_for_category(
        &self,
        reg_no: &str,
        category: &str,
    ) -> Result<Vec<CompletedCourseDetail>, AdviceError> {
        let category = category.trim().to_uppercase();
        if category.is_empty() {
            return Err(AdviceError::invalid_input(
                "category must be a non-empty string",
            ));
        }
        let register = RegisterNumber::parse(reg_no)?;
        let completed = self.store.completed_courses(register.raw())?;
        let curriculum = self.store.curriculum_for(register.department_code())?;
        let (_, courses) = earned_by_category(&completed, &curriculum);
        let in_category: BTreeSet<&String> = courses
            .get(&category)
            .map(|titles| titles.iter().collect())
            .unwrap_or_default();

        let details: Vec<CompletedCourseDetail> = curriculum
            .iter()
            .filter(|record| in_category.contains(&fold_title(&record.course_title)))
            .map(|record| {
                let code = match register.regulation() {
                    Regulation::R2019 => record.course_code_r2019.clone(),
                    Regulation::R2024 => record.course_code_r2024.clone(),
                };
                CompletedCourseDetail {
                    course_code: code.unwrap_or_else(|| "N/A".to_string()),
                    course_title: fold_title(&record.course_title),
                    theory_credits: record.theory_credits,
                    practical_credits: record.practical_credits,
                    total_credits: record.total_credits,
                }
            })
            .collect();
        Ok(details)
    }
}
