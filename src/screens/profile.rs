//! Student Profile screen
//!
//! Students see their own profile read-only. Admins search by email or
//! phone, edit every field but the email key, and save with `PATCH`.

use super::{or_dash, Notice};
use crate::api::RecordsApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{Role, Session, StudentField, StudentRecord};

pub const NOT_FOUND: &str = "No student found with given email or phone.";
pub const LOAD_FAILED: &str = "Error loading student data";
pub const EMPTY_QUERY: &str = "Enter an email or phone number to search.";
pub const SAVED: &str = "Student data updated successfully!";
pub const SAVE_REJECTED: &str = "Failed to update student data";
pub const SAVE_FAILED: &str = "Error updating student data";
pub const ADMIN_ONLY: &str = "Only administrators can edit student records.";
pub const NOTHING_LOADED: &str = "Search for a student before saving.";

/// Form state before a search blanked it
#[derive(Debug, Clone)]
struct Snapshot {
    form: StudentRecord,
    displayed: StudentRecord,
    loaded: bool,
}

#[derive(Debug, Clone)]
pub struct ProfileScreen {
    role: Role,
    identity: String,
    search_query: String,
    form: StudentRecord,
    displayed: StudentRecord,
    loaded: bool,
    error: Option<String>,
    busy: bool,
    restore: Option<Snapshot>,
}

impl ProfileScreen {
    pub fn new(session: &Session) -> Self {
        Self::for_role(session.role, &session.email)
    }

    pub fn for_role(role: Role, email: &str) -> Self {
        Self {
            role,
            identity: email.to_string(),
            search_query: String::new(),
            form: StudentRecord::default(),
            displayed: StudentRecord::default(),
            loaded: false,
            error: None,
            busy: false,
            restore: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn title(&self) -> &'static str {
        if self.role.is_admin() {
            "Admin - Edit Student"
        } else {
            "Student Details"
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Values bound to the admin's inputs
    pub fn form(&self) -> &StudentRecord {
        &self.form
    }

    /// Last loaded or saved record, shown in the read-only view
    pub fn displayed(&self) -> &StudentRecord {
        &self.displayed
    }

    pub fn display_value(&self, field: StudentField) -> &str {
        or_dash(self.displayed.get(field))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether an input for `field` accepts edits
    pub fn is_editable(&self, field: StudentField) -> bool {
        self.role.is_admin() && field != StudentField::Email
    }

    /// Edit a form field; ignored for students and for the email key
    pub fn set_field(&mut self, field: StudentField, value: impl Into<String>) -> bool {
        if !self.is_editable(field) {
            return false;
        }
        self.form.set(field, value);
        true
    }

    // ============ Mount ============

    /// Students load their own record on mount; admins start empty
    pub fn begin_mount(&mut self) -> Option<String> {
        if self.role.is_admin() {
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(self.identity.clone())
    }

    pub fn finish_mount(&mut self, outcome: ApiResult<Option<StudentRecord>>) {
        self.busy = false;
        match outcome {
            Ok(Some(record)) => self.populate(record),
            Ok(None) => {
                self.clear();
                self.error = Some(NOT_FOUND.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load own student record");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    // ============ Search ============

    /// Blank the form and hand back the query to look up (admins only)
    pub fn begin_search(&mut self) -> Option<String> {
        if !self.role.is_admin() {
            return None;
        }
        let query = self.search_query.trim().to_string();
        if query.is_empty() {
            self.error = Some(EMPTY_QUERY.to_string());
            return None;
        }
        self.error = None;
        self.busy = true;
        self.restore = Some(Snapshot {
            form: self.form.clone(),
            displayed: self.displayed.clone(),
            loaded: self.loaded,
        });
        self.form = StudentRecord::default();
        Some(query)
    }

    pub fn finish_search(&mut self, outcome: ApiResult<Option<StudentRecord>>) {
        self.busy = false;
        let snapshot = self.restore.take();
        match outcome {
            Ok(Some(record)) => {
                tracing::debug!(email = %record.email, "Student found");
                self.populate(record);
            }
            Ok(None) => {
                self.clear();
                self.error = Some(NOT_FOUND.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Student search failed");
                if let Some(snapshot) = snapshot {
                    self.form = snapshot.form;
                    self.displayed = snapshot.displayed;
                    self.loaded = snapshot.loaded;
                }
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    // ============ Submit ============

    /// Key and body of the `PATCH`, or the notice explaining why there is none
    pub fn prepare_submit(&self) -> Result<(String, StudentRecord), Notice> {
        if !self.role.is_admin() {
            return Err(Notice::failure(ADMIN_ONLY));
        }
        if !self.loaded || self.displayed.email.trim().is_empty() {
            return Err(Notice::failure(NOTHING_LOADED));
        }
        let mut record = self.form.clone();
        record.email = self.displayed.email.clone();
        Ok((record.email.clone(), record))
    }

    pub fn finish_submit(&mut self, record: StudentRecord, outcome: ApiResult<()>) -> Notice {
        match outcome {
            Ok(()) => {
                tracing::info!(email = %record.email, "Student record updated");
                self.displayed = record;
                Notice::success(SAVED)
            }
            Err(ApiError::Rejected(message)) => {
                tracing::warn!(%message, "Student update rejected");
                Notice::failure(SAVE_REJECTED)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Student update failed");
                Notice::failure(SAVE_FAILED)
            }
        }
    }

    // ============ Composed actions ============

    pub async fn mount<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        if let Some(email) = self.begin_mount() {
            let outcome = api.search_student(&email).await;
            self.finish_mount(outcome);
        }
    }

    pub async fn search<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        if let Some(query) = self.begin_search() {
            let outcome = api.search_student(&query).await;
            self.finish_search(outcome);
        }
    }

    pub async fn submit<A: RecordsApi + ?Sized>(&mut self, api: &A) -> Notice {
        match self.prepare_submit() {
            Ok((email, record)) => {
                let outcome = api.update_student(&email, &record).await;
                self.finish_submit(record, outcome)
            }
            Err(notice) => notice,
        }
    }

    fn populate(&mut self, record: StudentRecord) {
        self.form = record.clone();
        self.displayed = record;
        self.loaded = true;
        self.error = None;
    }

    fn clear(&mut self) {
        self.form = StudentRecord::default();
        self.displayed = StudentRecord::default();
        self.loaded = false;
    }
}
