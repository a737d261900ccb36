mod common;
use common::{tmp_data_dir, write_table};

use advisor::app::App;
use serde_json::Value;

fn seed_credit_tables(dir: &std::path::Path) {
    write_table(
        dir,
        "curriculum.json",
        &serde_json::json!({
            "23": [
                {
                    "course_title": "Data Structures",
                    "category": "PC",
                    "course_code_r2019": "CS8391",
                    "course_code_r2024": "CS2304",
                    "theory_credits": 3.0,
                    "practical_credits": 0.0,
                    "total_credits": 3.0
                },
                {
                    "course_title": "Operating Systems",
                    "category": "PC",
                    "course_code_r2019": "CS8493",
                    "course_code_r2024": "CS2402",
                    "theory_credits": 3.0,
                    "practical_credits": 1.0,
                    "total_credits": 4.0
                },
                {
                    "course_title": "Physics",
                    "category": "BS",
                    "total_credits": 4.0
                },
                {
                    "course_title": "Compiler Design",
                    "category": "PC",
                    "total_credits": 3.0
                }
            ]
        }),
    );
    write_table(
        dir,
        "students.json",
        &serde_json::json!({
            "201923230456": ["Data Structures, Operating Systems", "Physics"]
        }),
    );
    write_table(
        dir,
        "credit_requirements.json",
        &serde_json::json!({
            "R2024": {
                "AIDS": { "BS": 20.0, "PC": 45.0, "TOTAL": 160.0 }
            }
        }),
    );
}

#[tokio::test]
async fn summary_reports_earned_and_required_credits() {
    let dir = tmp_data_dir("advisor-credits");
    seed_credit_tables(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch(
            "credits",
            serde_json::json!({ "action": "credit_summary", "reg_no": "201923230456" }),
        )
        .await
        .expect("summary");

    assert_eq!(
        payload.pointer("/summary/earned_credits/PC").and_then(Value::as_f64),
        Some(7.0)
    );
    assert_eq!(
        payload.pointer("/summary/earned_credits/BS").and_then(Value::as_f64),
        Some(4.0)
    );
    assert_eq!(
        payload.pointer("/summary/earned_credits/TOTAL").and_then(Value::as_f64),
        Some(11.0)
    );
    // Categories without completions are zero-filled.
    assert_eq!(
        payload.pointer("/summary/earned_credits/OE").and_then(Value::as_f64),
        Some(0.0)
    );
    assert_eq!(
        payload.pointer("/summary/required_credits/PC").and_then(Value::as_f64),
        Some(45.0)
    );
    assert_eq!(
        payload.pointer("/summary/regulation").and_then(Value::as_str),
        Some("R2024")
    );
}

#[tokio::test]
async fn completed_courses_pick_codes_for_the_regulation() {
    let dir = tmp_data_dir("advisor-credits");
    seed_credit_tables(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch(
            "credits",
            serde_json::json!({
                "action": "completed_courses",
                "reg_no": "201923230456",
                "category": "pc"
            }),
        )
        .await
        .expect("courses");

    let courses = payload
        .get("courses")
        .and_then(|v| v.as_array())
        .expect("courses array");
    assert_eq!(courses.len(), 2);
    let codes: Vec<&str> = courses
        .iter()
        .filter_map(|course| course.get("course_code").and_then(Value::as_str))
        .collect();
    // Join year 23 falls under R2024, so the R2024 code column applies.
    assert!(codes.contains(&"CS2304"));
    assert!(codes.contains(&"CS2402"));
}

#[tokio::test]
async fn unknown_student_is_reported_as_data_unavailable() {
    let dir = tmp_data_dir("advisor-credits");
    seed_credit_tables(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let err = app
        .dispatcher
        .dispatch(
            "credits",
            serde_json::json!({ "action": "credit_summary", "reg_no": "209923230456" }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, "DATA_UNAVAILABLE");
}

#[tokio::test]
async fn malformed_register_number_is_rejected() {
    let dir = tmp_data_dir("advisor-credits");
    seed_credit_tables(&dir);
    let app = App::initialize_with_dir(&dir).expect("app");

    let err = app
        .dispatcher
        .dispatch(
            "credits",
            serde_json::json!({ "action": "credit_summary", "reg_no": "abc" }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, "INVALID_INPUT");
}

#[tokio::test]
async fn missing_requirement_table_still_returns_earned_credits() {
    let dir = tmp_data_dir("advisor-credits");
    seed_credit_tables(&dir);
    std::fs::remove_file(dir.join("credit_requirements.json")).expect("drop requirements");
    let app = App::initialize_with_dir(&dir).expect("app");

    let payload = app
        .dispatcher
        .dispatch(
            "credits",
            serde_json::json!({ "action": "credit_summary", "reg_no": "201923230456" }),
        )
        .await
        .expect("summary");

    assert_eq!(
        payload.pointer("/summary/earned_credits/TOTAL").and_then(Value::as_f64),
        Some(11.0)
    );
    assert!(payload.pointer("/summary/required_credits").is_none());
}
