pub mod matching {
    pub const VECTOR_MATCH_THRESHOLD: f64 = 0.5;
    pub const DUPLICATE_SCORE_THRESHOLD: u32 = 87;
    pub const FUZZY_SUGGESTION_FLOOR: u32 = 60;
    pub const SUGGESTION_LIMIT: usize = 5;
    pub const MAX_POOL_SIZE: usize = 2_000;
}

pub mod register {
    pub const REGISTER_NUMBER_LEN: usize = 12;
    pub const JOIN_YEAR_OFFSET: usize = 4;
    pub const DEPARTMENT_CODE_OFFSET: usize = 6;
    pub const MIN_JOIN_YEAR: u32 = 10;
    pub const MAX_YEARS_OF_STUDY: u32 = 4;
}

pub mod regulation {
    pub const CUTOFF_JOIN_YEAR: u32 = 22;
    pub const OLDER: &str = "R2019";
    pub const NEWER: &str = "R2024";
}

pub mod departments {
    pub const NAMES: &[(&str, &str)] = &[
        ("01", "Computer Science and Engineering"),
        ("10", "CSE (Cyber Security)"),
        ("11", "CSE (Internet of Things)"),
        ("22", "Information Technology"),
        ("23", "Artificial Intelligence and Data Science (AI&DS)"),
        ("24", "Artificial Intelligence and Machine Learning (AIML)"),
    ];

    pub const CREDIT_COLUMNS: &[(&str, &str)] = &[
        ("01", "CS"),
        ("10", "CSC"),
        ("11", "IOT"),
        ("22", "IT"),
        ("23", "AIDS"),
        ("24", "AIML"),
    ];

    pub fn display_name(code: &str) -> Option<&'static str> {
        NAMES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
    }

    pub fn credit_column(code: &str) -> Option<&'static str> {
        CREDIT_COLUMNS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, column)| *column)
    }
}

pub mod credits {
    pub const CATEGORIES: &[&str] = &["BS", "EEC", "ES", "HS", "MC", "OE", "PC", "PE"];
    pub const TOTAL_KEY: &str = "TOTAL";
}
