/// Canonical key form for course titles: trimmed and case-folded.
pub fn fold_title(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn tokenize(value: &str) -> Vec<String> {
    value
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Splits a completed-course cell. Cells carry one title or a comma-joined
/// list of titles.
pub fn split_course_cell(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(fold_title)
        .filter(|title| !title.is_empty())
        .collect()
}
