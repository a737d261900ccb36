use once_cell::sync::Lazy;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn tmp_data_dir(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
}

pub fn write_table(dir: &Path, file: &str, value: &Value) {
    std::fs::create_dir_all(dir).expect("create data dir");
    let payload = serde_json::to_string_pretty(value).expect("serialize table");
    std::fs::write(dir.join(file), payload).expect("write table");
}

pub fn seed_alias_rows(dir: &Path) {
    write_table(
        dir,
        "aliases.json",
        &serde_json::json!([
            {
                "canonical": "Data Structures",
                "aliases": ["DS", "Data Struct"],
                "alt_aliases": ["Data Structures and Algorithms"]
            },
            { "canonical": "Machine Learning", "aliases": ["ML"] },
            { "canonical": "Operating Systems", "aliases": ["OS"] }
        ]),
    );
}

pub fn seed_catalogs(dir: &Path) {
    write_table(
        dir,
        "catalogs.json",
        &serde_json::json!({
            "AIDS-PC": ["Data Structures", "Operating Systems"],
            "AIML-PC": [],
            "CSE-34-PC": ["Data Structures"],
            "CSE-12-PC": ["Machine Learning"]
        }),
    );
}
