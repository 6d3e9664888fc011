//! Enquiry list screen (admins only)

use super::Notice;
use crate::api::RecordsApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{Enquiry, EnquiryStatus, Role, Session};

pub const ADMIN_ONLY: &str = "Enquiries are only available to administrators.";
pub const LOAD_FAILED: &str = "Error loading enquiries";
pub const UPDATE_REJECTED: &str = "Failed to update enquiry";
pub const UPDATE_FAILED: &str = "Error updating enquiry";
pub const UNKNOWN: &str = "Enquiry not found";

#[derive(Debug, Clone)]
pub struct EnquiryScreen {
    role: Role,
    enquiries: Vec<Enquiry>,
    filter: String,
    loaded: bool,
    busy: bool,
    error: Option<String>,
}

impl EnquiryScreen {
    pub fn new(session: &Session) -> Self {
        Self::for_role(session.role)
    }

    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            enquiries: Vec::new(),
            filter: String::new(),
            loaded: false,
            busy: false,
            error: if role.is_admin() {
                None
            } else {
                Some(ADMIN_ONLY.to_string())
            },
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn enquiries(&self) -> &[Enquiry] {
        &self.enquiries
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Rows matching the current filter, in server order
    pub fn visible(&self) -> Vec<&Enquiry> {
        self.enquiries
            .iter()
            .filter(|e| e.matches(&self.filter))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.enquiries
            .iter()
            .filter(|e| e.status == EnquiryStatus::Open)
            .count()
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

    pub fn begin_load(&mut self) -> bool {
        if !self.role.is_admin() {
            return false;
        }
        self.busy = true;
        self.error = None;
        true
    }

    pub fn finish_load(&mut self, outcome: ApiResult<Vec<Enquiry>>) {
        self.busy = false;
        match outcome {
            Ok(enquiries) => {
                tracing::debug!(count = enquiries.len(), "Enquiries loaded");
                self.enquiries = enquiries;
                self.loaded = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load enquiries");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Check a status change before sending it
    pub fn prepare_status(&self, id: &str) -> Result<(), Notice> {
        if !self.role.is_admin() {
            return Err(Notice::failure(ADMIN_ONLY));
        }
        if !self.enquiries.iter().any(|e| e.id == id) {
            return Err(Notice::failure(UNKNOWN));
        }
        Ok(())
    }

    pub fn finish_status(&mut self, id: &str, status: EnquiryStatus, outcome: ApiResult<()>) -> Notice {
        match outcome {
            Ok(()) => {
                if let Some(enquiry) = self.enquiries.iter_mut().find(|e| e.id == id) {
                    enquiry.status = status;
                }
                tracing::info!(%id, status = status.as_str(), "Enquiry updated");
                Notice::success(format!("Enquiry marked {}", status.as_str()))
            }
            Err(ApiError::Rejected(message)) => {
                tracing::warn!(%id, %message, "Enquiry update rejected");
                Notice::failure(UPDATE_REJECTED)
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Enquiry update failed");
                Notice::failure(UPDATE_FAILED)
            }
        }
    }

    pub async fn load<A: RecordsApi + ?Sized>(&mut self, api: &A) {
        if self.begin_load() {
            let outcome = api.list_enquiries().await;
            self.finish_load(outcome);
        }
    }

    pub async fn set_status<A: RecordsApi + ?Sized>(
        &mut self,
        api: &A,
        id: &str,
        status: EnquiryStatus,
    ) -> Notice {
        if let Err(notice) = self.prepare_status(id) {
            return notice;
        }
        let outcome = api.set_enquiry_status(id, status).await;
        self.finish_status(id, status, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_enquiry, FakeApi};

    fn api() -> FakeApi {
        FakeApi::new()
            .with_enquiry(sample_enquiry("e1", "Ravi Kumar", "B.Com"))
            .with_enquiry(sample_enquiry("e2", "Simran Kaur", "B.Sc Computer Science"))
            .with_enquiry(sample_enquiry("e3", "Karan Mehta", "BCA"))
    }

    #[tokio::test]
    async fn test_admin_loads_and_filters() {
        let api = api();
        let mut screen = EnquiryScreen::for_role(Role::Admin);

        screen.load(&api).await;
        assert!(screen.is_loaded());
        assert_eq!(screen.visible().len(), 3);
        assert_eq!(screen.open_count(), 3);

        screen.set_filter("computer");
        let ids: Vec<_> = screen.visible().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e2"]);

        screen.set_filter("KARAN");
        assert_eq!(screen.visible()[0].id, "e3");
    }

    #[tokio::test]
    async fn test_student_makes_no_call() {
        let api = api();
        let mut screen = EnquiryScreen::for_role(Role::Student);

        screen.load(&api).await;

        assert_eq!(api.calls(), 0);
        assert_eq!(screen.error(), Some(ADMIN_ONLY));
        assert!(screen.enquiries().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_updates_row_in_place() {
        let api = api();
        let mut screen = EnquiryScreen::for_role(Role::Admin);
        screen.load(&api).await;

        let notice = screen.set_status(&api, "e2", EnquiryStatus::Resolved).await;

        assert!(notice.is_success());
        assert_eq!(api.writes(), vec!["PATCH /enquiry/e2"]);
        assert_eq!(screen.enquiries()[1].status, EnquiryStatus::Resolved);
        assert_eq!(screen.open_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_enquiry_is_not_sent() {
        let api = api();
        let mut screen = EnquiryScreen::for_role(Role::Admin);
        screen.load(&api).await;

        let notice = screen.set_status(&api, "nope", EnquiryStatus::Resolved).await;

        assert_eq!(notice, Notice::failure(UNKNOWN));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure() {
        let api = api();
        api.go_offline();
        let mut screen = EnquiryScreen::for_role(Role::Admin);

        screen.load(&api).await;

        assert_eq!(screen.error(), Some(LOAD_FAILED));
        assert!(!screen.is_loaded());
    }
}
