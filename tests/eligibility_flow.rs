mod common;
use common::{seed_alias_rows, seed_catalogs, tmp_data_dir, write_table, ENV_LOCK};

use advisor::app::App;
use serde_json::Value;

fn check_args(reg_no: &str, course: &str) -> Value {
    serde_json::json!({
        "action": "eligibility_check",
        "reg_no": reg_no,
        "course_name": course,
    })
}

fn eligibility_of(payload: &Value) -> &str {
    payload
        .get("eligibility")
        .and_then(|v| v.as_str())
        .expect("eligibility field")
}

#[tokio::test]
async fn alias_of_catalog_course_is_not_eligible() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("201923230456", "DS"))
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Not Eligible");
    assert_eq!(
        payload.get("matched_canonical").and_then(Value::as_str),
        Some("Data Structures")
    );
    let score = payload
        .pointer("/best_match/score")
        .and_then(Value::as_u64)
        .expect("best match score");
    assert!(score >= 87, "duplicate should score high, got {}", score);
}

#[tokio::test]
async fn unrelated_course_is_eligible() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch(
            "eligibility",
            check_args("201923230456", "Basket Weaving Fundamentals"),
        )
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Eligible");
    assert_eq!(
        payload.get("regulation").and_then(Value::as_str),
        Some("R2024")
    );
    assert!(payload.get("student_year").is_some());
}

#[tokio::test]
async fn malformed_register_number_is_invalid() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("12345", "Data Structures"))
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Invalid Register Number");
}

#[tokio::test]
async fn empty_catalog_is_unknown() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    // Department 24 maps to the seeded-but-empty AIML-PC catalog.
    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("201923240456", "Data Structures"))
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Unknown Eligibility");
}

#[tokio::test]
async fn unmapped_department_is_unknown() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("201923990456", "Data Structures"))
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Unknown Eligibility");
}

#[tokio::test]
async fn missing_catalog_table_is_unknown() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("201923230456", "Data Structures"))
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Unknown Eligibility");
}

#[tokio::test]
async fn eligible_course_attaches_offering_details() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    write_table(
        &dir,
        "online_courses.json",
        &serde_json::json!([
            {
                "title": "Machine Learning",
                "platform": "NPTEL",
                "course_code_r2024": "OC4201",
                "credits": 3.0,
                "duration": "12 weeks",
                "link": "https://example.edu/ml"
            }
        ]),
    );
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("201923230456", "Machine Learning"))
        .await
        .expect("verdict");

    assert_eq!(eligibility_of(&payload), "Eligible");
    assert_eq!(
        payload.pointer("/course_details/platform").and_then(Value::as_str),
        Some("NPTEL")
    );
}

#[tokio::test]
async fn profile_only_query_returns_student_info() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch(
            "eligibility",
            serde_json::json!({ "action": "eligibility_check", "reg_no": "201922010456" }),
        )
        .await
        .expect("profile");

    assert_eq!(
        payload.get("department").and_then(Value::as_str),
        Some("Computer Science and Engineering")
    );
    assert_eq!(
        payload.get("regulation").and_then(Value::as_str),
        Some("R2019")
    );
    assert!(payload.get("eligibility").is_none());
}

#[tokio::test]
async fn catalog_reload_swaps_the_snapshot() {
    let dir = tmp_data_dir("advisor-eligibility");
    seed_alias_rows(&dir);
    write_table(
        &dir,
        "catalogs.json",
        &serde_json::json!({ "AIDS-PC": ["Operating Systems"] }),
    );
    let app = App::initialize_with_dir(&dir).expect("app");

    let before = app
        .dispatcher
        .dispatch("eligibility", check_args("201923230456", "Data Structures"))
        .await
        .expect("verdict");
    assert_eq!(eligibility_of(&before), "Eligible");

    write_table(
        &dir,
        "catalogs.json",
        &serde_json::json!({ "AIDS-PC": ["Operating Systems", "Data Structures"] }),
    );
    app.store.reload();

    let after = app
        .dispatcher
        .dispatch("eligibility", check_args("201923230456", "Data Structures"))
        .await
        .expect("verdict");
    assert_eq!(eligibility_of(&after), "Not Eligible");
}

#[tokio::test]
async fn data_dir_env_override_is_honored() {
    let _guard = ENV_LOCK.lock().await;

    let dir = tmp_data_dir("advisor-env");
    seed_alias_rows(&dir);
    seed_catalogs(&dir);

    let previous = std::env::var("ADVISOR_DATA_DIR").ok();
    std::env::set_var("ADVISOR_DATA_DIR", &dir);

    let app = App::initialize().expect("app");
    let payload = app
        .dispatcher
        .dispatch("eligibility", check_args("201923230456", "DS"))
        .await
        .expect("verdict");
    assert_eq!(eligibility_of(&payload), "Not Eligible");

    match previous {
        Some(value) => std::env::set_var("ADVISOR_DATA_DIR", value),
        None => std::env::remove_var("ADVISOR_DATA_DIR"),
    }
}
