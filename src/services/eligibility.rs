use crate::constants::{departments, regulation, register};
use crate::errors::{AdviceError, AdviceErrorKind};
use crate::services::logger::Logger;
use crate::services::matcher::{best_against_catalog, FuzzyMatch, MatcherConfig};
use crate::stores::data_store::DataStore;
use crate::utils::text::fold_title;
use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

static REGISTER_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{12}$").expect("register number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regulation {
    R2019,
    R2024,
}

impl Regulation {
    pub fn from_join_year(join_year: u32) -> Self {
        if join_year <= regulation::CUTOFF_JOIN_YEAR {
            Regulation::R2019
        } else {
            Regulation::R2024
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Regulation::R2019 => regulation::OLDER,
            Regulation::R2024 => regulation::NEWER,
        }
    }
}

/// A validated 12-digit register number. Join year is chars 5-6,
/// department code chars 7-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNumber {
    raw: String,
    join_year: u32,
    department_code: String,
}

impl RegisterNumber {
    pub fn parse(raw: &str) -> Result<Self, AdviceError> {
        let trimmed = raw.trim();
        if !REGISTER_NUMBER_RE.is_match(trimmed) {
            return Err(AdviceError::invalid_input("Invalid Register Number").with_hint(format!(
                "Register numbers are exactly {} digits.",
                register::REGISTER_NUMBER_LEN
            )));
        }
        let join_year = trimmed[register::JOIN_YEAR_OFFSET..register::JOIN_YEAR_OFFSET + 2]
            .parse::<u32>()
            .map_err(|_| AdviceError::invalid_input("Invalid Register Number"))?;
        let department_code = trimmed
            [register::DEPARTMENT_CODE_OFFSET..register::DEPARTMENT_CODE_OFFSET + 2]
            .to_string();
        Ok(Self {
            raw: trimmed.to_string(),
            join_year,
            department_code,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn join_year(&self) -> u32 {
        self.join_year
    }

    pub fn department_code(&self) -> &str {
        &self.department_code
    }

    pub fn department_name(&self) -> Option<&'static str> {
        departments::display_name(&self.department_code)
    }

    pub fn regulation(&self) -> Regulation {
        Regulation::from_join_year(self.join_year)
    }

    pub fn year_of_study(&self, current_two_digit_year: u32) -> String {
        year_of_study(self.join_year, current_two_digit_year)
    }
}

/// Year-of-study label relative to a two-digit calendar year.
pub fn year_of_study(join_year: u32, current_two_digit_year: u32) -> String {
    if join_year < register::MIN_JOIN_YEAR || join_year > current_two_digit_year {
        return "Invalid Year".to_string();
    }
    let year = current_two_digit_year - join_year + 1;
    if year > register::MAX_YEARS_OF_STUDY {
        return "Graduated".to_string();
    }
    let suffix = match year {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{} Year", year, suffix)
}

pub fn current_two_digit_year() -> u32 {
    (chrono::Utc::now().year() % 100) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityStatus {
    Eligible,
    NotEligible,
    Invalid,
    Unknown,
}

impl EligibilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "Eligible",
            EligibilityStatus::NotEligible => "Not Eligible",
            EligibilityStatus::Invalid => "Invalid Register Number",
            EligibilityStatus::Unknown => "Unknown Eligibility",
        }
    }
}

impl Serialize for EligibilityStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub status: EligibilityStatus,
    pub reg_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<FuzzyMatch>,
}

impl EligibilityReport {
    fn invalid(reg_no: &str) -> Self {
        Self {
            status: EligibilityStatus::Invalid,
            reg_no: reg_no.trim().to_string(),
            department: None,
            regulation: None,
            year_of_study: None,
            matched_canonical: None,
            best_match: None,
        }
    }
}

#[derive(Clone)]
pub struct EligibilityService {
    logger: Logger,
    store: Arc<DataStore>,
    config: MatcherConfig,
}

impl EligibilityService {
    pub fn new(logger: Logger, store: Arc<DataStore>, config: MatcherConfig) -> Self {
        Self {
            logger: logger.child("eligibility"),
            store,
            config,
        }
    }

    /// Runs the full eligibility decision for one (register number, course
    /// name) pair. Malformed register numbers and missing backing tables
    /// surface as Invalid / Unknown verdicts, never as request failures.
    pub fn resolve(&self, reg_no: &str, course_name: &str) -> Result<EligibilityReport, AdviceError> {
        let course_name = course_name.trim();
        if course_name.is_empty() {
            return Err(AdviceError::invalid_input("course_name must be a non-empty string"));
        }

        let register = match RegisterNumber::parse(reg_no) {
            Ok(register) => register,
            Err(err) => {
                self.logger.debug("Rejected register number", Some(&serde_json::json!({
                    "reg_no": reg_no.trim(),
                    "error": err.message,
                })));
                return Ok(EligibilityReport::invalid(reg_no));
            }
        };

        let mut report = EligibilityReport {
            status: EligibilityStatus::Unknown,
            reg_no: register.raw().to_string(),
            department: register.department_name().map(str::to_string),
            regulation: Some(register.regulation().as_str()),
            year_of_study: Some(register.year_of_study(current_two_digit_year())),
            matched_canonical: None,
            best_match: None,
        };

        let catalog = match self
            .store
            .department_catalog(register.department_code(), register.regulation())
        {
            Ok(catalog) => catalog,
            Err(err) if err.kind == AdviceErrorKind::DataUnavailable => {
                self.logger.warn(
                    "Department catalog unavailable",
                    Some(&serde_json::json!({
                        "department": register.department_code(),
                        "regulation": register.regulation().as_str(),
                        "error": err.message,
                    })),
                );
                return Ok(report);
            }
            Err(err) => return Err(err),
        };

        let index = match self.store.alias_index() {
            Ok(index) => index,
            Err(err) if err.kind == AdviceErrorKind::DataUnavailable => {
                self.logger
                    .warn("Alias dictionary unavailable", Some(&serde_json::json!({
                        "error": err.message,
                    })));
                return Ok(report);
            }
            Err(err) => return Err(err),
        };

        let canonical = index.resolve(course_name);
        let normalized = fold_title(&canonical);
        report.matched_canonical = Some(canonical);

        let catalog_titles: BTreeSet<String> = catalog.iter().map(|t| fold_title(t)).collect();
        let expanded = index.expand(&catalog_titles);

        let best = match best_against_catalog(&normalized, expanded.iter().map(String::as_str)) {
            Ok(best) => best,
            Err(err) if err.kind == AdviceErrorKind::NoCandidates => {
                self.logger.warn(
                    "Empty catalog for eligibility check",
                    Some(&serde_json::json!({
                        "department": register.department_code(),
                        "regulation": register.regulation().as_str(),
                    })),
                );
                return Ok(report);
            }
            Err(err) => return Err(err),
        };

        self.logger.debug(
            "Best catalog match",
            Some(&serde_json::json!({
                "query": normalized,
                "match": best.name,
                "score": best.score,
            })),
        );

        report.status = if best.score >= self.config.duplicate_threshold {
            EligibilityStatus::NotEligible
        } else {
            EligibilityStatus::Eligible
        };
        report.best_match = Some(best);
        Ok(report)
    }
}
