use std::env;
use std::path::PathBuf;

fn normalize_env_path(value: Option<String>) -> Option<PathBuf> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if lowered == "undefined" || lowered == "null" {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

pub fn resolve_data_dir() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_DATA_DIR").ok()) {
        return path;
    }
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("data")
}

pub fn resolve_alias_rows_path() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_ALIASES_PATH").ok()) {
        return path;
    }
    resolve_data_dir().join("aliases.json")
}

pub fn resolve_catalogs_path() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_CATALOGS_PATH").ok()) {
        return path;
    }
    resolve_data_dir().join("catalogs.json")
}

pub fn resolve_curriculum_path() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_CURRICULUM_PATH").ok()) {
        return path;
    }
    resolve_data_dir().join("curriculum.json")
}

pub fn resolve_credit_requirements_path() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_CREDIT_REQUIREMENTS_PATH").ok()) {
        return path;
    }
    resolve_data_dir().join("credit_requirements.json")
}

pub fn resolve_online_courses_path() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_ONLINE_COURSES_PATH").ok()) {
        return path;
    }
    resolve_data_dir().join("online_courses.json")
}

pub fn resolve_students_path() -> PathBuf {
    if let Some(path) = normalize_env_path(env::var("ADVISOR_STUDENTS_PATH").ok()) {
        return path;
    }
    resolve_data_dir().join("students.json")
}
