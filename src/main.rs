use advisor::app::App;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "advisor", about = "Course credit and online-course eligibility advisor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check online-course eligibility for a student.
    Eligibility {
        #[arg(long)]
        reg_no: String,
        #[arg(long)]
        course: Option<String>,
    },
    /// Suggest course names for a partial query.
    Autocomplete {
        #[arg(long)]
        query: String,
    },
    /// Earned and required credits per category.
    Credits {
        #[arg(long)]
        reg_no: String,
    },
    /// Completed courses within one credit category.
    Courses {
        #[arg(long)]
        reg_no: String,
        #[arg(long)]
        category: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let app = match App::initialize() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("advisor: {}", err);
            std::process::exit(1);
        }
    };

    let (tool, args) = match cli.command {
        Command::Eligibility { reg_no, course } => (
            "eligibility",
            serde_json::json!({
                "action": "eligibility_check",
                "reg_no": reg_no,
                "course_name": course,
            }),
        ),
        Command::Autocomplete { query } => (
            "eligibility",
            serde_json::json!({ "action": "autocomplete", "query": query }),
        ),
        Command::Credits { reg_no } => (
            "credits",
            serde_json::json!({ "action": "credit_summary", "reg_no": reg_no }),
        ),
        Command::Courses { reg_no, category } => (
            "credits",
            serde_json::json!({
                "action": "completed_courses",
                "reg_no": reg_no,
                "category": category,
            }),
        ),
    };

    match app.dispatcher.dispatch(tool, args).await {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
        }
        Err(err) => {
            let payload = serde_json::to_value(&err).unwrap_or_default();
            eprintln!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
            std::process::exit(1);
        }
    }
}
