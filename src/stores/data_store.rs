use crate::errors::AdviceError;
use crate::services::alias_index::{AliasIndex, AliasRow};
use crate::services::eligibility::Regulation;
use crate::services::logger::Logger;
use crate::utils::paths;
use crate::utils::text::{fold_title, split_course_cell};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumRecord {
    pub course_title: String,
    pub category: String,
    #[serde(default)]
    pub course_code_r2019: Option<String>,
    #[serde(default)]
    pub course_code_r2024: Option<String>,
    #[serde(default)]
    pub theory_credits: Option<f64>,
    #[serde(default)]
    pub practical_credits: Option<f64>,
    #[serde(default)]
    pub total_credits: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineCourseRecord {
    pub title: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub course_code_r2019: Option<String>,
    #[serde(default)]
    pub course_code_r2024: Option<String>,
    #[serde(default)]
    pub credits: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// regulation -> department column -> category -> required credits.
type RequirementTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>;

#[derive(Default)]
struct Snapshot {
    alias_index: Option<Arc<AliasIndex>>,
    catalogs: Option<BTreeMap<String, Vec<String>>>,
    curriculum: Option<BTreeMap<String, Vec<CurriculumRecord>>>,
    requirements: Option<RequirementTable>,
    students: Option<BTreeMap<String, Vec<String>>>,
    online_courses: Option<Vec<OnlineCourseRecord>>,
}

#[derive(Debug, Clone)]
struct DataPaths {
    aliases: PathBuf,
    catalogs: PathBuf,
    curriculum: PathBuf,
    requirements: PathBuf,
    students: PathBuf,
    online_courses: PathBuf,
}

impl DataPaths {
    fn from_env() -> Self {
        Self {
            aliases: paths::resolve_alias_rows_path(),
            catalogs: paths::resolve_catalogs_path(),
            curriculum: paths::resolve_curriculum_path(),
            requirements: paths::resolve_credit_requirements_path(),
            students: paths::resolve_students_path(),
            online_courses: paths::resolve_online_courses_path(),
        }
    }

    fn from_dir(dir: &Path) -> Self {
        Self {
            aliases: dir.join("aliases.json"),
            catalogs: dir.join("catalogs.json"),
            curriculum: dir.join("curriculum.json"),
            requirements: dir.join("credit_requirements.json"),
            students: dir.join("students.json"),
            online_courses: dir.join("online_courses.json"),
        }
    }
}

/// Read-only snapshot over the table files. The whole snapshot is rebuilt
/// on `reload()` and swapped in one write; readers always observe a fully
/// built set of tables. The matching engine never mutates loaded data.
pub struct DataStore {
    logger: Logger,
    paths: DataPaths,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl DataStore {
    pub fn new(logger: Logger) -> Self {
        Self::with_paths(logger, DataPaths::from_env())
    }

    pub fn with_dir(logger: Logger, dir: &Path) -> Self {
        Self::with_paths(logger, DataPaths::from_dir(dir))
    }

    fn with_paths(logger: Logger, paths: DataPaths) -> Self {
        let store = Self {
            logger: logger.child("store"),
            paths,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        };
        store.reload();
        store
    }

    fn read_table<T: DeserializeOwned>(&self, path: &Path, label: &str) -> Option<T> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    self.logger.warn(
                        "Failed to read table",
                        Some(&serde_json::json!({
                            "table": label,
                            "path": path.display().to_string(),
                            "error": err.to_string(),
                        })),
                    );
                }
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                self.logger.warn(
                    "Failed to parse table",
                    Some(&serde_json::json!({
                        "table": label,
                        "path": path.display().to_string(),
                        "error": err.to_string(),
                    })),
                );
                None
            }
        }
    }

    /// Rebuilds every table from disk and swaps the snapshot atomically.
    pub fn reload(&self) {
        let alias_rows: Option<Vec<AliasRow>> = self.read_table(&self.paths.aliases, "aliases");
        let snapshot = Snapshot {
            alias_index: alias_rows
                .map(|rows| Arc::new(AliasIndex::build(&rows, &self.logger))),
            catalogs: self.read_table(&self.paths.catalogs, "catalogs"),
            curriculum: self.read_table(&self.paths.curriculum, "curriculum"),
            requirements: self.read_table(&self.paths.requirements, "credit_requirements"),
            students: self.read_table(&self.paths.students, "students"),
            online_courses: self.read_table(&self.paths.online_courses, "online_courses"),
        };
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(|err| err.into_inner());
        *guard = Arc::new(snapshot);
    }

    fn current(&self) -> Arc<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn alias_index(&self) -> Result<Arc<AliasIndex>, AdviceError> {
        self.current()
            .alias_index
            .clone()
            .ok_or_else(|| AdviceError::data_unavailable("Alias dictionary is not loaded"))
    }

    /// Catalog titles for a department + regulation pair.
    pub fn department_catalog(
        &self,
        department_code: &str,
        regulation: Regulation,
    ) -> Result<Vec<String>, AdviceError> {
        let key = catalog_key(department_code, regulation).ok_or_else(|| {
            AdviceError::data_unavailable(format!(
                "No catalog mapped for department {} under {}",
                department_code,
                regulation.as_str()
            ))
        })?;
        let snapshot = self.current();
        let catalogs = snapshot
            .catalogs
            .as_ref()
            .ok_or_else(|| AdviceError::data_unavailable("Catalog table is not loaded"))?;
        catalogs
            .get(key)
            .cloned()
            .ok_or_else(|| AdviceError::data_unavailable(format!("Catalog '{}' not found", key)))
    }

    pub fn curriculum_for(&self, department_code: &str) -> Result<Vec<CurriculumRecord>, AdviceError> {
        let snapshot = self.current();
        let curriculum = snapshot
            .curriculum
            .as_ref()
            .ok_or_else(|| AdviceError::data_unavailable("Curriculum table is not loaded"))?;
        curriculum.get(department_code).cloned().ok_or_else(|| {
            AdviceError::data_unavailable(format!(
                "No curriculum for department {}",
                department_code
            ))
        })
    }

    /// Required credits per category for a department column under one
    /// regulation era.
    pub fn credit_requirements(
        &self,
        regulation: Regulation,
        department_column: &str,
    ) -> Result<BTreeMap<String, f64>, AdviceError> {
        let snapshot = self.current();
        let requirements = snapshot
            .requirements
            .as_ref()
            .ok_or_else(|| AdviceError::data_unavailable("Credit requirement table is not loaded"))?;
        requirements
            .get(regulation.as_str())
            .and_then(|columns| columns.get(department_column))
            .cloned()
            .ok_or_else(|| {
                AdviceError::data_unavailable(format!(
                    "No credit requirements for {} under {}",
                    department_column,
                    regulation.as_str()
                ))
            })
    }

    /// Completed-course titles for one student, folded and with
    /// comma-joined cells split apart.
    pub fn completed_courses(&self, reg_no: &str) -> Result<Vec<String>, AdviceError> {
        let snapshot = self.current();
        let students = snapshot
            .students
            .as_ref()
            .ok_or_else(|| AdviceError::data_unavailable("Student records are not loaded"))?;
        let cells = students.get(reg_no.trim()).ok_or_else(|| {
            AdviceError::data_unavailable(format!("No records for register number {}", reg_no.trim()))
        })?;
        Ok(cells.iter().flat_map(|cell| split_course_cell(cell)).collect())
    }

    /// Online-course offering record matching the given title, if the
    /// offering table is present and carries one.
    pub fn online_course(&self, title: &str) -> Option<OnlineCourseRecord> {
        let folded = fold_title(title);
        self.current()
            .online_courses
            .as_ref()?
            .iter()
            .find(|record| fold_title(&record.title) == folded)
            .cloned()
    }
}

/// Catalog key for a department + regulation pair. CSE and IT split by
/// regulation era; the other four departments carry a single catalog.
pub fn catalog_key(department_code: &str, regulation: Regulation) -> Option<&'static str> {
    match (department_code, regulation) {
        ("23", _) => Some("AIDS-PC"),
        ("24", _) => Some("AIML-PC"),
        ("10", _) => Some("CS-PC"),
        ("11", _) => Some("IOT-PC"),
        ("01", Regulation::R2019) => Some("CSE-34-PC"),
        ("01", Regulation::R2024) => Some("CSE-12-PC"),
        ("22", Regulation::R2019) => Some("IT-34-PC"),
        ("22", Regulation::R2024) => Some("IT-12-PC"),
        _ => None,
    }
}
