//! In-memory API used by the unit tests

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::api::{AuthApi, RecordsApi};
use crate::error::{ApiError, ApiResult};
use crate::models::*;

struct Account {
    password: String,
    phone: Option<String>,
    role: Role,
}

/// Fake records service with call accounting
#[derive(Default)]
pub struct FakeApi {
    accounts: RefCell<HashMap<String, Account>>,
    students: RefCell<Vec<StudentRecord>>,
    results: RefCell<HashMap<String, ResultRecord>>,
    enquiries: RefCell<Vec<Enquiry>>,
    calls: Cell<usize>,
    writes: RefCell<Vec<String>>,
    offline: Cell<bool>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, email: &str, password: &str, role: Role) -> Self {
        self.accounts.borrow_mut().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                phone: None,
                role,
            },
        );
        self
    }

    pub fn with_phone(self, email: &str, phone: &str) -> Self {
        if let Some(account) = self.accounts.borrow_mut().get_mut(email) {
            account.phone = Some(phone.to_string());
        }
        self
    }

    pub fn with_student(self, record: StudentRecord) -> Self {
        self.students.borrow_mut().push(record);
        self
    }

    pub fn with_result(self, record: ResultRecord) -> Self {
        self.results
            .borrow_mut()
            .insert(record.roll_number().to_string(), record);
        self
    }

    pub fn with_enquiry(self, enquiry: Enquiry) -> Self {
        self.enquiries.borrow_mut().push(enquiry);
        self
    }

    /// Every following call fails at the transport level
    pub fn go_offline(&self) {
        self.offline.set(true);
    }

    pub fn token_for(&self, email: &str) -> String {
        format!("token-{}", email)
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Write requests seen so far, as `METHOD path`
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn student(&self, email: &str) -> Option<StudentRecord> {
        self.students
            .borrow()
            .iter()
            .find(|s| s.email == email)
            .cloned()
    }

    pub fn result(&self, roll_number: &str) -> Option<ResultRecord> {
        self.results.borrow().get(roll_number).cloned()
    }

    fn enter(&self) -> ApiResult<()> {
        self.calls.set(self.calls.get() + 1);
        if self.offline.get() {
            Err(ApiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn issue(&self, email: &str) -> ApiResult<AuthResponse> {
        let accounts = self.accounts.borrow();
        let account = accounts.get(email).ok_or(ApiError::Unauthorized)?;
        Ok(AuthResponse {
            user: UserProfile {
                id: None,
                name: None,
                email: email.to_string(),
                role: account.role,
            },
            token: self.token_for(email),
        })
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.enter()?;
        let email = {
            let accounts = self.accounts.borrow();
            let found = match credentials {
                Credentials::Email { email, password } => accounts
                    .get(email)
                    .filter(|a| &a.password == password)
                    .map(|_| email.clone()),
                Credentials::Phone { phone, password } => accounts
                    .iter()
                    .find(|(_, a)| a.phone.as_deref() == Some(phone.as_str()) && &a.password == password)
                    .map(|(email, _)| email.clone()),
            };
            found.ok_or(ApiError::Unauthorized)?
        };
        self.issue(&email)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse> {
        self.enter()?;
        self.accounts.borrow_mut().insert(
            registration.email.clone(),
            Account {
                password: registration.password.clone(),
                phone: None,
                role: Role::Student,
            },
        );
        self.issue(&registration.email)
    }

    async fn profile(&self, token: &str) -> ApiResult<UserProfile> {
        self.enter()?;
        let email = self
            .accounts
            .borrow()
            .keys()
            .find(|email| self.token_for(email) == token)
            .cloned()
            .ok_or(ApiError::Unauthorized)?;
        self.issue(&email).map(|r| r.user)
    }
}

#[async_trait(?Send)]
impl RecordsApi for FakeApi {
    async fn search_student(&self, query: &str) -> ApiResult<Option<StudentRecord>> {
        self.enter()?;
        let query = query.trim();
        Ok(self
            .students
            .borrow()
            .iter()
            .find(|s| s.email == query || s.phone_number == query)
            .cloned())
    }

    async fn update_student(&self, email: &str, record: &StudentRecord) -> ApiResult<()> {
        self.enter()?;
        self.writes.borrow_mut().push(format!("PATCH /student/{}", email));
        let mut students = self.students.borrow_mut();
        let existing = students
            .iter_mut()
            .find(|s| s.email == email)
            .ok_or_else(|| ApiError::Rejected("Student not found".to_string()))?;
        *existing = record.clone();
        Ok(())
    }

    async fn fetch_result(&self, roll_number: &str) -> ApiResult<Option<ResultRecord>> {
        self.enter()?;
        Ok(self.results.borrow().get(roll_number.trim()).cloned())
    }

    async fn create_result(&self, record: &ResultRecord) -> ApiResult<()> {
        self.enter()?;
        self.writes.borrow_mut().push("POST /result".to_string());
        self.results
            .borrow_mut()
            .insert(record.roll_number().to_string(), record.clone());
        Ok(())
    }

    async fn update_result(&self, roll_number: &str, record: &ResultRecord) -> ApiResult<()> {
        self.enter()?;
        self.writes.borrow_mut().push(format!("PUT /result/{}", roll_number));
        let mut results = self.results.borrow_mut();
        if !results.contains_key(roll_number) {
            return Err(ApiError::Rejected("Result not found".to_string()));
        }
        results.insert(roll_number.to_string(), record.clone());
        Ok(())
    }

    async fn list_enquiries(&self) -> ApiResult<Vec<Enquiry>> {
        self.enter()?;
        Ok(self.enquiries.borrow().clone())
    }

    async fn set_enquiry_status(&self, id: &str, status: EnquiryStatus) -> ApiResult<()> {
        self.enter()?;
        self.writes.borrow_mut().push(format!("PATCH /enquiry/{}", id));
        let mut enquiries = self.enquiries.borrow_mut();
        let enquiry = enquiries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::Rejected("Enquiry not found".to_string()))?;
        enquiry.status = status;
        Ok(())
    }
}

// ============ Fixtures ============

pub fn sample_student() -> StudentRecord {
    StudentRecord {
        student_name: "Asha Verma".to_string(),
        guardian_name: "Rakesh Verma".to_string(),
        gender: "Female".to_string(),
        address: "12 Mall Road, Amritsar".to_string(),
        phone_number: "9876543210".to_string(),
        email: "asha@college.edu".to_string(),
        roll_number: "STU123".to_string(),
        status: "Single".to_string(),
        blood_group: "B+".to_string(),
    }
}

pub fn sample_result() -> ResultRecord {
    ResultRecord {
        student_info: StudentInfo {
            full_name: "Asha Verma".to_string(),
            roll_number: "STU123".to_string(),
            course: "B.Sc Computer Science".to_string(),
            semester: "Semester 2".to_string(),
            session: "2025".to_string(),
        },
        subjects: vec![
            subject("ENG101", "English", 100.0, 78.0, "B+"),
            subject("MAT102", "Mathematics", 100.0, 88.0, "A"),
            subject("PHY103", "Physics", 100.0, 67.0, "B"),
            subject("CSC104", "Computer Science", 100.0, 92.0, "A+"),
        ],
        status: Some(ResultStatus::Pass),
    }
}

pub fn subject(code: &str, name: &str, max: f64, obtained: f64, grade: &str) -> Subject {
    Subject {
        code: code.to_string(),
        name: name.to_string(),
        max_marks: max,
        obtained_marks: obtained,
        grade: grade.to_string(),
    }
}

pub fn sample_enquiry(id: &str, name: &str, course: &str) -> Enquiry {
    Enquiry {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@mail.com", name.to_lowercase().replace(' ', ".")),
        phone: "9000000000".to_string(),
        course: course.to_string(),
        message: "Please share the fee structure".to_string(),
        status: EnquiryStatus::Open,
        created_at: None,
    }
}
