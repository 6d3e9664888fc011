//! Result Sheet screen
//!
//! Admins look a sheet up by roll number. A hit opens it for editing
//! (saved with `PUT`); a miss opens a new sheet for that roll number
//! (saved with `POST`). Students see their own sheet read-only.

use super::{or_dash, Notice};
use crate::api::RecordsApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{ResultRecord, ResultStatus, Role, Session, StudentInfo, StudentRecord, Subject};
use crate::summary::MarksSummary;
use crate::validation::{parse_marks, require, FieldErrors};

pub const LOAD_FAILED: &str = "Error loading result data";
pub const EMPTY_ROLL: &str = "Enter a roll number to search.";
pub const NO_SUBJECTS: &str = "Add at least one subject before saving.";
pub const SAVED: &str = "Result saved successfully!";
pub const SAVE_REJECTED: &str = "Failed to save result";
pub const SAVE_FAILED: &str = "Error saving result";
pub const ADMIN_ONLY: &str = "Only administrators can edit results.";
pub const NOTHING_OPEN: &str = "Search for a roll number before saving.";
pub const INVALID_FORM: &str = "Please fix the highlighted fields.";
pub const NOT_PUBLISHED: &str = "No result has been published for your roll number yet.";
pub const NO_PROFILE: &str = "No student found with given email or phone.";

fn creating_message(roll_number: &str) -> String {
    format!(
        "No result found for roll number {}. A new result will be created.",
        roll_number
    )
}

/// What the screen is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultMode {
    /// Admin, nothing searched yet
    Idle,
    /// Student viewing their own sheet
    ReadOnly,
    Editing { roll_number: String },
    Creating { roll_number: String },
}

/// Header inputs of the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    FullName,
    RollNumber,
    Course,
    Semester,
    Session,
}

impl InfoField {
    pub const ALL: [InfoField; 5] = [
        InfoField::FullName,
        InfoField::RollNumber,
        InfoField::Course,
        InfoField::Semester,
        InfoField::Session,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InfoField::FullName => "Full Name",
            InfoField::RollNumber => "Roll Number",
            InfoField::Course => "Course",
            InfoField::Semester => "Semester",
            InfoField::Session => "Session",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            InfoField::FullName => "fullName",
            InfoField::RollNumber => "rollNumber",
            InfoField::Course => "course",
            InfoField::Semester => "semester",
            InfoField::Session => "session",
        }
    }

    pub fn get(self, info: &StudentInfo) -> &str {
        match self {
            InfoField::FullName => &info.full_name,
            InfoField::RollNumber => &info.roll_number,
            InfoField::Course => &info.course,
            InfoField::Semester => &info.semester,
            InfoField::Session => &info.session,
        }
    }

    fn slot(self, info: &mut StudentInfo) -> &mut String {
        match self {
            InfoField::FullName => &mut info.full_name,
            InfoField::RollNumber => &mut info.roll_number,
            InfoField::Course => &mut info.course,
            InfoField::Semester => &mut info.semester,
            InfoField::Session => &mut info.session,
        }
    }
}

/// Columns of the subjects table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectColumn {
    Code,
    Name,
    MaxMarks,
    ObtainedMarks,
    Grade,
}

impl SubjectColumn {
    pub const ALL: [SubjectColumn; 5] = [
        SubjectColumn::Code,
        SubjectColumn::Name,
        SubjectColumn::MaxMarks,
        SubjectColumn::ObtainedMarks,
        SubjectColumn::Grade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubjectColumn::Code => "Code",
            SubjectColumn::Name => "Subject",
            SubjectColumn::MaxMarks => "Max Marks",
            SubjectColumn::ObtainedMarks => "Obtained",
            SubjectColumn::Grade => "Grade",
        }
    }
}

/// One editable row; marks stay text until the sheet is submitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectRow {
    pub code: String,
    pub name: String,
    pub max_marks: String,
    pub obtained_marks: String,
    pub grade: String,
}

impl SubjectRow {
    pub fn get(&self, column: SubjectColumn) -> &str {
        match column {
            SubjectColumn::Code => &self.code,
            SubjectColumn::Name => &self.name,
            SubjectColumn::MaxMarks => &self.max_marks,
            SubjectColumn::ObtainedMarks => &self.obtained_marks,
            SubjectColumn::Grade => &self.grade,
        }
    }

    pub fn set(&mut self, column: SubjectColumn, value: impl Into<String>) {
        let value = value.into();
        match column {
            SubjectColumn::Code => self.code = value,
            SubjectColumn::Name => self.name = value,
            SubjectColumn::MaxMarks => self.max_marks = value,
            SubjectColumn::ObtainedMarks => self.obtained_marks = value,
            SubjectColumn::Grade => self.grade = value,
        }
    }
}

impl From<&Subject> for SubjectRow {
    fn from(subject: &Subject) -> Self {
        Self {
            code: subject.code.clone(),
            name: subject.name.clone(),
            max_marks: format_marks(subject.max_marks),
            obtained_marks: format_marks(subject.obtained_marks),
            grade: subject.grade.clone(),
        }
    }
}

fn format_marks(marks: f64) -> String {
    if marks.fract() == 0.0 {
        format!("{}", marks as i64)
    } else {
        marks.to_string()
    }
}

/// Form state of a result sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultForm {
    pub student_info: StudentInfo,
    pub subjects: Vec<SubjectRow>,
    /// `""`, `"Pass"` or `"Fail"`, as bound to the select
    pub status: String,
}

impl ResultForm {
    pub fn from_record(record: &ResultRecord) -> Self {
        Self {
            student_info: record.student_info.clone(),
            subjects: record.subjects.iter().map(SubjectRow::from).collect(),
            status: record.status.map(|s| s.to_string()).unwrap_or_default(),
        }
    }

    /// Empty sheet keyed by `roll_number`
    pub fn blank_for(roll_number: &str) -> Self {
        Self {
            student_info: StudentInfo {
                roll_number: roll_number.to_string(),
                ..StudentInfo::default()
            },
            ..Self::default()
        }
    }

    /// Validate and convert into the wire record
    pub fn to_record(&self) -> Result<ResultRecord, FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in InfoField::ALL {
            require(&mut errors, field.key(), field.label(), field.get(&self.student_info));
        }

        let status = self.status.parse::<ResultStatus>().ok();
        if status.is_none() {
            errors.add("status", "Result status must be Pass or Fail");
        }

        if self.subjects.is_empty() {
            errors.add("subjects", NO_SUBJECTS);
        }

        let mut subjects = Vec::with_capacity(self.subjects.len());
        for (index, row) in self.subjects.iter().enumerate() {
            let n = index + 1;
            if row.code.trim().is_empty() {
                errors.add("subjects", format!("Subject {}: code is required", n));
            }
            if row.name.trim().is_empty() {
                errors.add("subjects", format!("Subject {}: name is required", n));
            }
            let max = parse_marks(&row.max_marks);
            let obtained = parse_marks(&row.obtained_marks);
            match (max, obtained) {
                (Some(max), Some(obtained)) => subjects.push(Subject {
                    code: row.code.trim().to_string(),
                    name: row.name.trim().to_string(),
                    max_marks: max,
                    obtained_marks: obtained,
                    grade: row.grade.trim().to_string(),
                }),
                (None, _) => errors.add("subjects", format!("Subject {}: max marks must be a number", n)),
                (_, None) => {
                    errors.add("subjects", format!("Subject {}: obtained marks must be a number", n))
                }
            }
        }

        match status {
            Some(status) if errors.is_empty() => Ok(ResultRecord {
                student_info: self.student_info.clone(),
                subjects,
                status: Some(status),
            }),
            _ => Err(errors),
        }
    }

    /// Totals over the rows whose marks parse
    pub fn summary(&self) -> MarksSummary {
        self.subjects.iter().fold(MarksSummary::default(), |acc, row| MarksSummary {
            obtained: acc.obtained + parse_marks(&row.obtained_marks).unwrap_or(0.0),
            max: acc.max + parse_marks(&row.max_marks).unwrap_or(0.0),
        })
    }
}

/// Request a valid submit turns into
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSubmission {
    Create(ResultRecord),
    Update {
        roll_number: String,
        record: ResultRecord,
    },
}

impl ResultSubmission {
    pub fn record(&self) -> &ResultRecord {
        match self {
            ResultSubmission::Create(record) => record,
            ResultSubmission::Update { record, .. } => record,
        }
    }

    pub async fn send<A: RecordsApi + ?Sized>(&self, api: &A) -> ApiResult<()> {
        match self {
            ResultSubmission::Create(record) => api.create_result(record).await,
            ResultSubmission::Update {
                roll_number,
                record,
            } => api.update_result(roll_number, record).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultScreen {
    role: Role,
    identity: String,
    search_roll: String,
    mode: ResultMode,
    form: ResultForm,
    error: Option<String>,
    info: Option<String>,
    field_errors: FieldErrors,
    busy: bool,
}

impl ResultScreen {
    pub fn new(session: &Session) -> Self {
        Self::for_role(session.role, &session.email)
    }

    pub fn for_role(role: Role, email: &str) -> Self {
        Self {
            role,
            identity: email.to_string(),
            search_roll: String::new(),
            mode: if role.is_admin() {
                ResultMode::Idle
            } else {
                ResultMode::ReadOnly
            },
            form: ResultForm::default(),
            error: None,
            info: None,
            field_errors: FieldErrors::new(),
            busy: false,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn title(&self) -> &'static str {
        if self.role.is_admin() {
            "Admin - Manage Result"
        } else {
            "Student Result"
        }
    }

    pub fn mode(&self) -> &ResultMode {
        &self.mode
    }

    pub fn form(&self) -> &ResultForm {
        &self.form
    }

    pub fn search_roll(&self) -> &str {
        &self.search_roll
    }

    pub fn set_search_roll(&mut self, roll_number: impl Into<String>) {
        self.search_roll = roll_number.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Informational line, e.g. that a new sheet is being created
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the sheet accepts edits right now
    pub fn is_editable(&self) -> bool {
        self.role.is_admin()
            && matches!(
                self.mode,
                ResultMode::Editing { .. } | ResultMode::Creating { .. }
            )
    }

    pub fn display_info(&self, field: InfoField) -> &str {
        or_dash(field.get(&self.form.student_info))
    }

    pub fn display_status(&self) -> &str {
        or_dash(&self.form.status)
    }

    /// `"81.25%"` style summary of the current sheet
    pub fn percentage_label(&self) -> String {
        self.form.summary().percentage_label()
    }

    // ============ Editing ============

    /// Edit a header field; the roll number is the key and stays fixed
    pub fn set_info(&mut self, field: InfoField, value: impl Into<String>) -> bool {
        if !self.is_editable() || field == InfoField::RollNumber {
            return false;
        }
        *field.slot(&mut self.form.student_info) = value.into();
        true
    }

    pub fn set_status(&mut self, status: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.form.status = status.into();
        true
    }

    pub fn add_subject(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.form.subjects.push(SubjectRow::default());
        true
    }

    pub fn remove_subject(&mut self, index: usize) -> bool {
        if !self.is_editable() || index >= self.form.subjects.len() {
            return false;
        }
        self.form.subjects.remove(index);
        true
    }

    pub fn set_subject(&mut self, index: usize, column: SubjectColumn, value: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        match self.form.subjects.get_mut(index) {
            Some(row) => {
                row.set(column, value);
                true
            }
            None => false,
        }
    }

    /// Replace the whole subjects table
    pub fn set_subjects(&mut self, rows: Vec<SubjectRow>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.form.subjects = rows;
        true
    }

    // ============ Mount (students) ============

    /// Students first resolve their roll number from their profile
    pub fn begin_mount(&mut self) -> Option<String> {
        if self.role.is_admin() {
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(self.identity.clone())
    }

    /// Apply the profile lookup; yields the roll number to fetch next
    pub fn finish_mount_profile(&mut self, outcome: ApiResult<Option<StudentRecord>>) -> Option<String> {
        match outcome {
            Ok(Some(profile)) if !profile.roll_number.trim().is_empty() => {
                Some(profile.roll_number.trim().to_string())
            }
            Ok(_) => {
                self.busy = false;
                self.error = Some(NO_PROFILE.to_string());
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to resolve own roll number");
                self.busy = false;
                self.error = Some(LOAD_FAILED.to_string());
                None
            }
        }
    }

    pub fn finish_mount(&mut self, outcome: ApiResult<Option<ResultRecord>>) {
        self.busy = false;
        match outcome {
            Ok(Some(record)) => {
                self.form = ResultForm::from_record(&record);
            }
            Ok(None) => {
                self.form = ResultForm::default();
                self.info = Some(NOT_PUBLISHED.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load own result");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    // ============ Search (admins) ============

    pub fn begin_search(&mut self) -> Option<String> {
        if !self.role.is_admin() {
            return None;
        }
        let roll_number = self.search_roll.trim().to_string();
        if roll_number.is_empty() {
            self.error = Some(EMPTY_ROLL.to_string());
            return None;
        }
        self.error = None;
        self.info = None;
        self.busy = true;
        Some(roll_number)
    }

    /// Apply a lookup of `roll_number`; a miss opens a new sheet for it
    pub fn finish_search(&mut self, roll_number: &str, outcome: ApiResult<Option<ResultRecord>>) {
        self.busy = false;
        match outcome {
            Ok(Some(record)) => {
                tracing::debug!(roll_number = %record.roll_number(), "Result found");
                self.form = ResultForm::from_record(&record);
                self.field_errors = FieldErrors::new();
                self.mode = ResultMode::Editing {
                    roll_number: roll_number.to_string(),
                };
            }
            Ok(None) => {
                tracing::debug!(%roll_number, "No result, switching to create mode");
                self.form = ResultForm::blank_for(roll_number);
                self.field_errors = FieldErrors::new();
                self.info = Some(creating_message(roll_number));
                self.mode = ResultMode::Creating {
                    roll_number: roll_number.to_string(),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "Result search failed");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    // ============ Submit ============

    /// Validate locally; no request is built for an invalid sheet
    pub fn prepare_submit(&mut self) -> Result<ResultSubmission, Notice> {
        if !self.role.is_admin() {
            return Err(Notice::failure(ADMIN_ONLY));
        }
        let mode = self.mode.clone();
        let record = match &mode {
            ResultMode::Editing { .. } | ResultMode::Creating { .. } => self.form.to_record(),
            _ => return Err(Notice::failure(NOTHING_OPEN)),
        };
        let record = match record {
            Ok(record) => {
                self.field_errors = FieldErrors::new();
                record
            }
            Err(errors) => {
                let message = if self.form.subjects.is_empty() {
                    NO_SUBJECTS
                } else {
                    INVALID_FORM
                };
                self.field_errors = errors;
                return Err(Notice::failure(message));
            }
        };

        Ok(match mode {
            ResultMode::Creating { .. } => ResultSubmission::Create(record),
            ResultMode::Editing { roll_number } => ResultSubmission::Update { roll_number, record },
            ResultMode::Idle | ResultMode::ReadOnly => return Err(Notice::failure(NOTHING_OPEN)),
        })
    }

    pub fn finish_submit(&mut self, submission: &ResultSubmission, outcome: ApiResult<()>) -> Notice {
        match outcome {
            Ok(()) => {
                let record = submission.record();
                tracing::info!(roll_number = %record.roll_number(), "Result saved");
                self.form = ResultForm::from_record(record);
                self.info = None;
                self.mode = ResultMode::Editing {
                    roll_number: record.roll_number().to_string(),
                };
                Notice::success(SAVED)
            }
            Err(ApiError::Rejected(message)) => {
                tracing::warn!(%message, "Result save rejected");
                Notice::failure(SAVE_REJECTED)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Result save failed");
                Notice::failure(SAVE_FAILED)
            }
        }
    }

    // ============ Composed actions ============

    pub async fn mount<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        let Some(email) = self.begin_mount() else {
            return;
        };
        let profile = api.search_student(&email).await;
        if let Some(roll_number) = self.finish_mount_profile(profile) {
            let outcome = api.fetch_result(&roll_number).await;
            self.finish_mount(outcome);
        }
    }

    pub async fn search<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        if let Some(roll_number) = self.begin_search() {
            let outcome = api.fetch_result(&roll_number).await;
            self.finish_search(&roll_number, outcome);
        }
    }

    pub async fn submit<A: RecordsApi + ?Sized>(&mut self, api: &A) -> Notice {
        match self.prepare_submit() {
            Ok(submission) => {
                let outcome = submission.send(api).await;
                self.finish_submit(&submission, outcome)
            }
            Err(notice) => notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_result, sample_student, FakeApi};

    fn admin() -> ResultScreen {
        ResultScreen::for_role(Role::Admin, "admin@college.edu")
    }

    fn fill_row(screen: &mut ResultScreen, index: usize, cells: [&str; 5]) {
        for (column, value) in SubjectColumn::ALL.into_iter().zip(cells) {
            assert!(screen.set_subject(index, column, value));
        }
    }

    #[tokio::test]
    async fn test_search_hit_opens_editing() {
        let api = FakeApi::new().with_result(sample_result());
        let mut screen = admin();

        screen.set_search_roll("STU123");
        screen.search(&api).await;

        assert_eq!(
            screen.mode(),
            &ResultMode::Editing {
                roll_number: "STU123".to_string()
            }
        );
        assert_eq!(screen.form().subjects.len(), 4);
        assert_eq!(screen.form().subjects[0].max_marks, "100");
        assert_eq!(screen.form().status, "Pass");
        assert_eq!(screen.percentage_label(), "81.25%");
    }

    #[tokio::test]
    async fn test_search_miss_switches_to_create_mode() {
        let api = FakeApi::new().with_result(sample_result());
        let mut screen = admin();
        screen.set_search_roll("STU123");
        screen.search(&api).await;

        screen.set_search_roll(" STU999 ");
        screen.search(&api).await;

        assert_eq!(
            screen.mode(),
            &ResultMode::Creating {
                roll_number: "STU999".to_string()
            }
        );
        assert_eq!(screen.form().student_info.roll_number, "STU999");
        assert!(screen.form().subjects.is_empty());
        assert!(screen.info().unwrap().contains("STU999"));
        assert!(screen.error().is_none());
    }

    #[tokio::test]
    async fn test_empty_subjects_rejected_without_network_call() {
        let api = FakeApi::new();
        let mut screen = admin();
        screen.set_search_roll("STU500");
        screen.search(&api).await;
        let calls_before = api.calls();

        for field in [InfoField::FullName, InfoField::Course, InfoField::Semester, InfoField::Session] {
            screen.set_info(field, "x");
        }
        screen.set_status("Pass");

        let notice = screen.submit(&api).await;

        assert_eq!(notice, Notice::failure(NO_SUBJECTS));
        assert_eq!(screen.field_errors().get("subjects"), Some(NO_SUBJECTS));
        assert_eq!(api.calls(), calls_before);
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_new_sheet() {
        let api = FakeApi::new();
        let mut screen = admin();
        screen.set_search_roll("STU500");
        screen.search(&api).await;

        screen.set_info(InfoField::FullName, "Meera Gill");
        screen.set_info(InfoField::Course, "B.Pharm");
        screen.set_info(InfoField::Semester, "Semester 1");
        screen.set_info(InfoField::Session, "2026");
        screen.set_status("Fail");
        assert!(screen.add_subject());
        fill_row(&mut screen, 0, ["PHA101", "Pharmaceutics", "100", "31", "F"]);

        let notice = screen.submit(&api).await;

        assert!(notice.is_success(), "{:?}", notice);
        assert_eq!(api.writes(), vec!["POST /result"]);
        let saved = api.result("STU500").unwrap();
        assert_eq!(saved.status, Some(ResultStatus::Fail));
        assert_eq!(saved.subjects[0].obtained_marks, 31.0);
        assert_eq!(
            screen.mode(),
            &ResultMode::Editing {
                roll_number: "STU500".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_update_puts_existing_sheet() {
        let api = FakeApi::new().with_result(sample_result());
        let mut screen = admin();
        screen.set_search_roll("STU123");
        screen.search(&api).await;

        assert!(screen.remove_subject(3));
        assert!(screen.add_subject());
        fill_row(&mut screen, 3, ["BIO105", "Biology", "50", "45", "A"]);

        let notice = screen.submit(&api).await;

        assert_eq!(notice, Notice::success(SAVED));
        assert_eq!(api.writes(), vec!["PUT /result/STU123"]);
        let saved = api.result("STU123").unwrap();
        assert_eq!(saved.subjects.len(), 4);
        assert_eq!(saved.subjects[3].code, "BIO105");
    }

    #[tokio::test]
    async fn test_sheet_without_status_is_editable() {
        let mut stored = sample_result();
        stored.status = None;
        let api = FakeApi::new().with_result(stored);
        let mut screen = admin();
        screen.set_search_roll("STU123");
        screen.search(&api).await;

        assert!(screen.is_editable());
        assert_eq!(screen.form().status, "");
        assert_eq!(screen.display_status(), "-");

        let notice = screen.submit(&api).await;
        assert_eq!(notice, Notice::failure(INVALID_FORM));
        assert!(screen.field_errors().get("status").is_some());
        assert!(api.writes().is_empty());

        screen.set_status("Pass");
        let notice = screen.submit(&api).await;
        assert_eq!(notice, Notice::success(SAVED));
        assert_eq!(api.result("STU123").unwrap().status, Some(ResultStatus::Pass));
    }

    #[tokio::test]
    async fn test_invalid_marks_are_reported() {
        let api = FakeApi::new().with_result(sample_result());
        let mut screen = admin();
        screen.set_search_roll("STU123");
        screen.search(&api).await;
        screen.set_subject(1, SubjectColumn::ObtainedMarks, "eighty");

        let notice = screen.submit(&api).await;

        assert_eq!(notice, Notice::failure(INVALID_FORM));
        assert_eq!(
            screen.field_errors().get("subjects"),
            Some("Subject 2: obtained marks must be a number")
        );
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_roll_number_is_locked() {
        let api = FakeApi::new().with_result(sample_result());
        let mut screen = admin();
        screen.set_search_roll("STU123");
        screen.search(&api).await;

        assert!(!screen.set_info(InfoField::RollNumber, "STU000"));
        assert_eq!(screen.form().student_info.roll_number, "STU123");
    }

    #[tokio::test]
    async fn test_idle_screen_cannot_be_edited_or_saved() {
        let api = FakeApi::new();
        let mut screen = admin();
        assert!(!screen.add_subject());
        assert_eq!(screen.submit(&api).await, Notice::failure(NOTHING_OPEN));
    }

    #[tokio::test]
    async fn test_student_sees_own_sheet_read_only() {
        let api = FakeApi::new()
            .with_student(sample_student())
            .with_result(sample_result());
        let mut screen = ResultScreen::for_role(Role::Student, "asha@college.edu");

        screen.mount(&api).await;

        assert_eq!(screen.mode(), &ResultMode::ReadOnly);
        assert_eq!(screen.display_info(InfoField::Course), "B.Sc Computer Science");
        assert_eq!(screen.percentage_label(), "81.25%");
        assert!(!screen.is_editable());
        assert!(!screen.add_subject());
        assert_eq!(screen.submit(&api).await, Notice::failure(ADMIN_ONLY));
    }

    #[tokio::test]
    async fn test_student_without_published_result() {
        let api = FakeApi::new().with_student(sample_student());
        let mut screen = ResultScreen::for_role(Role::Student, "asha@college.edu");

        screen.mount(&api).await;

        assert_eq!(screen.info(), Some(NOT_PUBLISHED));
        assert_eq!(screen.percentage_label(), "0%");
        assert_eq!(screen.display_status(), "-");
    }

    #[tokio::test]
    async fn test_failed_search_keeps_sheet() {
        let api = FakeApi::new().with_result(sample_result());
        let mut screen = admin();
        screen.set_search_roll("STU123");
        screen.search(&api).await;

        api.go_offline();
        screen.set_search_roll("STU777");
        screen.search(&api).await;

        assert_eq!(screen.error(), Some(LOAD_FAILED));
        assert_eq!(screen.form().student_info.roll_number, "STU123");
        assert_eq!(
            screen.mode(),
            &ResultMode::Editing {
                roll_number: "STU123".to_string()
            }
        );
    }
}
