//! Campus Records CLI
//!
//! Command-line front end for the student-records service:
//! - Sign in, register, sign out
//! - View and edit student profiles
//! - View, create and edit result sheets
//! - Review admission enquiries

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use campus_records::config::{generate_default_config, Config, LoggingConfig};
use campus_records::guard::{self, GuardDecision};
use campus_records::models::{EnquiryStatus, Session, StudentField};
use campus_records::screens::{
    EnquiryScreen, InfoField, Notice, ProfileScreen, ResultMode, ResultScreen, SubjectColumn,
    SubjectRow,
};
use campus_records::session::{FileStorage, SessionStore, TokenStorage};
use campus_records::validation::{self, FieldErrors, LoginMethod};
use campus_records::{HttpClient, SessionError};

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Student records, results and enquiries from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Records API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email or phone
    Login {
        /// Email address
        #[arg(long, conflicts_with = "phone", required_unless_present = "phone")]
        email: Option<String>,
        /// 10-digit phone number
        #[arg(long)]
        phone: Option<String>,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a student account and sign in
    Register {
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Display name
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Student profiles
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Result sheets
    Result {
        #[command(subcommand)]
        command: ResultCommand,
    },

    /// Admission enquiries (admins)
    Enquiry {
        #[command(subcommand)]
        command: EnquiryCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Show a profile (admins search by email or phone; students see their own)
    Show { query: Option<String> },

    /// Edit a profile (admins)
    Update {
        email: String,
        /// Field assignments, e.g. --set address="12 Mall Road"
        #[arg(long = "set", required = true)]
        set: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ResultCommand {
    /// Show a result sheet (admins by roll number; students see their own)
    Show { roll: Option<String> },

    /// Create or edit a result sheet (admins)
    Save {
        roll: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        semester: Option<String>,
        #[arg(long)]
        session: Option<String>,
        /// Pass or Fail
        #[arg(long)]
        status: Option<String>,
        /// Add or replace a subject: CODE:NAME:MAX:OBTAINED[:GRADE]
        #[arg(long)]
        subject: Vec<String>,
        /// Remove the subject with this code
        #[arg(long)]
        remove_subject: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum EnquiryCommand {
    /// List enquiries
    List {
        /// Match against name, email, phone or course
        #[arg(long)]
        filter: Option<String>,
    },

    /// Mark an enquiry resolved
    Resolve {
        id: String,
        /// Mark it open again instead
        #[arg(long)]
        reopen: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, skipped) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Vec::new()),
        None => Config::discover(&Config::search_paths(), |key| std::env::var(key).ok()),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    init_logging(&config.logging);
    for error in &skipped {
        eprintln!("Warning: {} (file ignored)", error);
    }

    if !matches!(cli.format.as_str(), "table" | "json") {
        fail(format!("Unknown format: {} (expected table or json)", cli.format));
    }
    let json = cli.format == "json";

    let api = HttpClient::new(&config.api)?;
    let mut store = SessionStore::new(FileStorage::new(&config.session.token_file));

    match cli.command {
        Commands::Login {
            email,
            phone,
            password,
        } => {
            if let GuardDecision::Redirect(_) = guard::public_only(store.has_token()) {
                if let Ok(session) = store.load_session(&api).await {
                    println!("Already logged in as {} ({})", session.email, session.role);
                    return Ok(());
                }
            }
            let (method, identifier) = match (email, phone) {
                (_, Some(phone)) => (LoginMethod::Phone, phone),
                (email, None) => (LoginMethod::Email, email.unwrap_or_default()),
            };
            let password = password_or_prompt(password)?;
            let credentials = validation::login_credentials(method, &identifier, &password)
                .unwrap_or_else(|errors| fail_fields(&errors));

            match store.login(&api, &credentials).await {
                Ok(session) => println!("Logged in as {} ({})", session.email, session.role),
                Err(e) => fail(format!("Login failed: {}", e)),
            }
        }

        Commands::Register {
            email,
            password,
            name,
        } => {
            let password = password_or_prompt(password)?;
            let registration = validation::registration(&email, &password, &name)
                .unwrap_or_else(|errors| fail_fields(&errors));

            match store.register(&api, &registration).await {
                Ok(session) => println!("Registered and logged in as {} ({})", session.email, session.role),
                Err(e) => fail(format!("Registration failed: {}", e)),
            }
        }

        Commands::Logout => {
            store.logout();
            println!("Logged out");
        }

        Commands::Whoami => {
            let session = require_session(&mut store, &api).await;
            if json {
                let body = serde_json::json!({ "email": session.email, "role": session.role });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{} ({})", session.email, session.role);
            }
        }

        Commands::Student { command } => {
            let session = require_session(&mut store, &api).await;
            let api = api.with_token(Some(session.token.clone()));
            let mut screen = ProfileScreen::new(&session);

            match command {
                StudentCommand::Show { query } => {
                    load_profile(&mut screen, &api, query).await;
                    print_profile(&screen, json)?;
                }
                StudentCommand::Update { email, set } => {
                    load_profile(&mut screen, &api, Some(email)).await;
                    for assignment in &set {
                        let (field, value) = parse_assignment(assignment)?;
                        if !screen.set_field(field, value) {
                            fail(format!("{} cannot be edited", field.label()));
                        }
                    }
                    report(screen.submit(&api).await);
                }
            }
        }

        Commands::Result { command } => {
            let session = require_session(&mut store, &api).await;
            let api = api.with_token(Some(session.token.clone()));
            let mut screen = ResultScreen::new(&session);

            match command {
                ResultCommand::Show { roll } => {
                    load_result(&mut screen, &api, roll).await;
                    print_result(&screen, json)?;
                }
                ResultCommand::Save {
                    roll,
                    full_name,
                    course,
                    semester,
                    session: academic_session,
                    status,
                    subject,
                    remove_subject,
                } => {
                    load_result(&mut screen, &api, Some(roll)).await;
                    if let Some(info) = screen.info() {
                        println!("{}", info);
                    }

                    let updates = [
                        (InfoField::FullName, full_name),
                        (InfoField::Course, course),
                        (InfoField::Semester, semester),
                        (InfoField::Session, academic_session),
                    ];
                    for (field, value) in updates {
                        if let Some(value) = value {
                            screen.set_info(field, value);
                        }
                    }
                    if let Some(status) = status {
                        screen.set_status(status);
                    }

                    let mut rows = screen.form().subjects.clone();
                    rows.retain(|row| !remove_subject.iter().any(|code| code == &row.code));
                    for entry in &subject {
                        let row = parse_subject(entry)?;
                        match rows.iter_mut().find(|r| r.code == row.code) {
                            Some(existing) => *existing = row,
                            None => rows.push(row),
                        }
                    }
                    screen.set_subjects(rows);

                    let notice = screen.submit(&api).await;
                    for (_, message) in screen.field_errors().iter() {
                        eprintln!("  {}", message);
                    }
                    report(notice);
                }
            }
        }

        Commands::Enquiry { command } => {
            let session = require_session(&mut store, &api).await;
            let api = api.with_token(Some(session.token.clone()));
            let mut screen = EnquiryScreen::new(&session);
            screen.load(&api).await;
            if let Some(error) = screen.error() {
                fail(error);
            }

            match command {
                EnquiryCommand::List { filter } => {
                    screen.set_filter(filter.unwrap_or_default());
                    print_enquiries(&screen, json)?;
                }
                EnquiryCommand::Resolve { id, reopen } => {
                    let status = if reopen {
                        EnquiryStatus::Open
                    } else {
                        EnquiryStatus::Resolved
                    };
                    report(screen.set_status(&api, &id, status).await);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, &config)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("campus_records={}", config.level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn fail(message: impl Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn fail_fields(errors: &FieldErrors) -> ! {
    for (_, message) in errors.iter() {
        eprintln!("{}", message);
    }
    std::process::exit(1);
}

fn report(notice: Notice) {
    if notice.is_success() {
        println!("{}", notice.message);
    } else {
        fail(notice.message);
    }
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

async fn require_session<S: TokenStorage>(store: &mut SessionStore<S>, api: &HttpClient) -> Session {
    if let GuardDecision::Redirect(_) = guard::protected(store.has_token()) {
        fail("Not logged in. Run `campus-cli login` first.");
    }
    match store.load_session(api).await {
        Ok(session) => session,
        Err(SessionError::NoToken) => fail("Not logged in. Run `campus-cli login` first."),
        Err(SessionError::InvalidToken) => fail("Session expired. Please log in again."),
        Err(e) => fail(format!("Failed to restore session: {}", e)),
    }
}

async fn load_profile(screen: &mut ProfileScreen, api: &HttpClient, query: Option<String>) {
    if screen.role().is_admin() {
        screen.set_search_query(query.unwrap_or_default());
        screen.search(api).await;
    } else {
        if query.is_some() {
            eprintln!("Students can only view their own profile; ignoring query");
        }
        screen.mount(api).await;
    }
    if let Some(error) = screen.error() {
        fail(error);
    }
}

async fn load_result(screen: &mut ResultScreen, api: &HttpClient, roll: Option<String>) {
    if screen.role().is_admin() {
        screen.set_search_roll(roll.unwrap_or_default());
        screen.search(api).await;
    } else {
        if roll.is_some() {
            eprintln!("Students can only view their own result; ignoring roll number");
        }
        screen.mount(api).await;
    }
    if let Some(error) = screen.error() {
        fail(error);
    }
}

/// `field=value`, field named by label or wire key
fn parse_assignment(assignment: &str) -> anyhow::Result<(StudentField, String)> {
    let (field, value) = assignment
        .split_once('=')
        .with_context(|| format!("Expected field=value, got '{}'", assignment))?;
    let field = field.parse::<StudentField>().map_err(anyhow::Error::msg)?;
    Ok((field, value.to_string()))
}

/// `CODE:NAME:MAX:OBTAINED[:GRADE]`
fn parse_subject(entry: &str) -> anyhow::Result<SubjectRow> {
    let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) || parts[0].is_empty() {
        anyhow::bail!("Invalid subject '{}', expected CODE:NAME:MAX:OBTAINED[:GRADE]", entry);
    }
    Ok(SubjectRow {
        code: parts[0].to_string(),
        name: parts[1].to_string(),
        max_marks: parts[2].to_string(),
        obtained_marks: parts[3].to_string(),
        grade: parts.get(4).map(|g| g.to_string()).unwrap_or_default(),
    })
}

fn print_profile(screen: &ProfileScreen, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(screen.displayed())?);
        return Ok(());
    }

    println!("{}", screen.title());
    println!("{}", "-".repeat(40));
    for field in StudentField::ALL {
        println!("{:<16} {}", field.label(), screen.display_value(field));
    }
    Ok(())
}

fn print_result(screen: &ResultScreen, json: bool) -> anyhow::Result<()> {
    let form = screen.form();
    if json {
        let subjects: Vec<_> = form
            .subjects
            .iter()
            .map(|row| {
                serde_json::json!({
                    "code": row.code,
                    "name": row.name,
                    "maxMarks": row.max_marks,
                    "obtainedMarks": row.obtained_marks,
                    "grade": row.grade,
                })
            })
            .collect();
        let body = serde_json::json!({
            "studentInfo": form.student_info,
            "subjects": subjects,
            "status": form.status,
            "percentage": screen.percentage_label(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if let ResultMode::Creating { roll_number } = screen.mode() {
        println!("No result found for roll number {}", roll_number);
        return Ok(());
    }
    if let Some(info) = screen.info() {
        println!("{}", info);
        return Ok(());
    }

    println!("{}", screen.title());
    println!("{}", "-".repeat(60));
    for field in InfoField::ALL {
        println!("{:<12} {}", field.label(), screen.display_info(field));
    }
    println!();

    let widths = [8, 24, 10, 10, 6];
    for (column, width) in SubjectColumn::ALL.iter().zip(widths) {
        print!("{:<width$} ", column.label(), width = width);
    }
    println!();
    println!("{}", "-".repeat(62));
    for row in &form.subjects {
        for (column, width) in SubjectColumn::ALL.iter().zip(widths) {
            print!("{:<width$} ", row.get(*column), width = width);
        }
        println!();
    }
    println!();
    println!("Percentage   {}", screen.percentage_label());
    println!("Status       {}", screen.display_status());
    Ok(())
}

fn print_enquiries(screen: &EnquiryScreen, json: bool) -> anyhow::Result<()> {
    let rows = screen.visible();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No enquiries");
        return Ok(());
    }

    println!(
        "{:<10} {:<20} {:<28} {:<12} {:<20} {:<9} {:<10}",
        "ID", "Name", "Email", "Phone", "Course", "Status", "Received"
    );
    println!("{}", "-".repeat(115));
    for e in rows {
        let received = e
            .created_at
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<20} {:<28} {:<12} {:<20} {:<9} {:<10}",
            e.id,
            e.name,
            e.email,
            e.phone,
            e.course,
            e.status.as_str(),
            received
        );
    }
    println!();
    println!("{} open of {}", screen.open_count(), screen.enquiries().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subject() {
        let row = parse_subject("MAT102:Mathematics:100:88:A").unwrap();
        assert_eq!(row.code, "MAT102");
        assert_eq!(row.obtained_marks, "88");
        assert_eq!(row.grade, "A");

        let row = parse_subject("PHY103:Physics:100:67").unwrap();
        assert_eq!(row.grade, "");

        assert!(parse_subject("PHY103:Physics").is_err());
        assert!(parse_subject(":Physics:100:67").is_err());
    }

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("bloodGroup=O+").unwrap();
        assert_eq!(field, StudentField::BloodGroup);
        assert_eq!(value, "O+");

        let (field, value) = parse_assignment("address=12 Mall Road, Amritsar").unwrap();
        assert_eq!(field, StudentField::Address);
        assert_eq!(value, "12 Mall Road, Amritsar");

        assert!(parse_assignment("address").is_err());
        assert!(parse_assignment("shoe_size=9").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "campus-cli",
            "result",
            "save",
            "STU123",
            "--status",
            "Pass",
            "--subject",
            "ENG101:English:100:78:B+",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, "json");
        assert!(matches!(
            cli.command,
            Commands::Result {
                command: ResultCommand::Save { .. }
            }
        ));
    }
}
