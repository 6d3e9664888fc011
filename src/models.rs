//! Record Types
//!
//! Wire and in-memory shapes for users, sessions, student profiles, result
//! sheets and enquiries. Field names follow the records API (camelCase).

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Student,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User profile as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// The signed-in identity plus its opaque token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    pub email: String,
    pub token: String,
}

impl Session {
    pub fn new(user: &UserProfile, token: impl Into<String>) -> Self {
        Self {
            role: user.role,
            email: user.email.clone(),
            token: token.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Login credentials: the login screen accepts either an email or a phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Credentials {
    Email { email: String, password: String },
    Phone { phone: String, password: String },
}

impl Credentials {
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Email {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn phone(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Phone {
            phone: phone.into(),
            password: password.into(),
        }
    }

    /// The identifier the user typed (email or phone)
    pub fn login_id(&self) -> &str {
        match self {
            Credentials::Email { email, .. } => email,
            Credentials::Phone { phone, .. } => phone,
        }
    }
}

/// Sign-up form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response body of login and register
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

// ============ Student Profile ============

/// A student's profile, keyed by email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentRecord {
    pub student_name: String,
    pub guardian_name: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub roll_number: String,
    /// Marital status
    pub status: String,
    pub blood_group: String,
}

/// Editable fields of a [`StudentRecord`], in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    StudentName,
    GuardianName,
    Gender,
    Address,
    PhoneNumber,
    Email,
    RollNumber,
    Status,
    BloodGroup,
}

impl StudentField {
    pub const ALL: [StudentField; 9] = [
        StudentField::StudentName,
        StudentField::GuardianName,
        StudentField::Gender,
        StudentField::Address,
        StudentField::PhoneNumber,
        StudentField::Email,
        StudentField::RollNumber,
        StudentField::Status,
        StudentField::BloodGroup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StudentField::StudentName => "Student Name",
            StudentField::GuardianName => "Guardian Name",
            StudentField::Gender => "Gender",
            StudentField::Address => "Address",
            StudentField::PhoneNumber => "Phone Number",
            StudentField::Email => "Email",
            StudentField::RollNumber => "Roll Number",
            StudentField::Status => "Marital Status",
            StudentField::BloodGroup => "Blood Group",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            StudentField::Gender => Some("Male/Female/Other"),
            StudentField::Status => Some("Single/Married"),
            StudentField::BloodGroup => Some("A+,A-,B+,B-"),
            _ => None,
        }
    }

    /// Wire name, also accepted by the CLI's `--set field=value`
    pub fn key(self) -> &'static str {
        match self {
            StudentField::StudentName => "studentName",
            StudentField::GuardianName => "guardianName",
            StudentField::Gender => "gender",
            StudentField::Address => "address",
            StudentField::PhoneNumber => "phoneNumber",
            StudentField::Email => "email",
            StudentField::RollNumber => "rollNumber",
            StudentField::Status => "status",
            StudentField::BloodGroup => "bloodGroup",
        }
    }
}

impl FromStr for StudentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        StudentField::ALL
            .into_iter()
            .find(|f| f.key().to_ascii_lowercase() == normalized)
            .ok_or_else(|| format!("Unknown student field: {}", s))
    }
}

impl StudentRecord {
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::StudentName => &self.student_name,
            StudentField::GuardianName => &self.guardian_name,
            StudentField::Gender => &self.gender,
            StudentField::Address => &self.address,
            StudentField::PhoneNumber => &self.phone_number,
            StudentField::Email => &self.email,
            StudentField::RollNumber => &self.roll_number,
            StudentField::Status => &self.status,
            StudentField::BloodGroup => &self.blood_group,
        }
    }

    pub fn set(&mut self, field: StudentField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StudentField::StudentName => self.student_name = value,
            StudentField::GuardianName => self.guardian_name = value,
            StudentField::Gender => self.gender = value,
            StudentField::Address => self.address = value,
            StudentField::PhoneNumber => self.phone_number = value,
            StudentField::Email => self.email = value,
            StudentField::RollNumber => self.roll_number = value,
            StudentField::Status => self.status = value,
            StudentField::BloodGroup => self.blood_group = value,
        }
    }
}

// ============ Result Sheet ============

/// Pass/fail outcome of a result sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Pass,
    Fail,
}

impl ResultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultStatus::Pass => "Pass",
            ResultStatus::Fail => "Fail",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(ResultStatus::Pass),
            "fail" => Ok(ResultStatus::Fail),
            other => Err(format!("Unknown result status: {}", other)),
        }
    }
}

/// Header block of a result sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentInfo {
    pub full_name: String,
    pub roll_number: String,
    pub course: String,
    pub semester: String,
    pub session: String,
}

/// One row of the subjects table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub max_marks: f64,
    #[serde(default, deserialize_with = "lenient_marks")]
    pub obtained_marks: f64,
    #[serde(default)]
    pub grade: String,
}

/// A student's result sheet, keyed by roll number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub student_info: StudentInfo,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Unset when the server holds a blank or unrecognised status
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ResultStatus>,
}

/// Marks arrive as numbers or as the text typed into a form; blank or null is zero
fn lenient_marks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Marks {
        Number(f64),
        Text(String),
    }

    match Option::<Marks>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Marks::Number(value)) => Ok(value),
        Some(Marks::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(0.0);
            }
            text.parse::<f64>()
                .map_err(|_| de::Error::custom(format!("marks must be numeric, got {:?}", text)))
        }
    }
}

fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ResultStatus>, D::Error> {
    let status = Option::<String>::deserialize(deserializer)?;
    Ok(status.and_then(|s| s.parse().ok()))
}

impl ResultRecord {
    pub fn roll_number(&self) -> &str {
        &self.student_info.roll_number
    }
}

// ============ Enquiries ============

/// Follow-up state of an enquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    Open,
    Resolved,
}

impl EnquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnquiryStatus::Open => "open",
            EnquiryStatus::Resolved => "resolved",
        }
    }
}

/// An admission enquiry left by a prospective student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: EnquiryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Enquiry {
    /// Case-insensitive match against name, email, phone and course
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.email, &self.phone, &self.course]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_record_wire_names() {
        let json = r#"{"studentName":"Asha","email":"asha@college.edu","rollNumber":"STU9"}"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.student_name, "Asha");
        assert_eq!(record.roll_number, "STU9");
        assert_eq!(record.blood_group, "");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["guardianName"], "");
        assert_eq!(back["phoneNumber"], "");
    }

    #[test]
    fn test_result_record_parses_numbers() {
        let json = r#"{
            "studentInfo": {"fullName": "John Doe", "rollNumber": "STU123", "course": "B.Sc", "semester": "2", "session": "2025"},
            "subjects": [{"code": "ENG101", "name": "English", "maxMarks": 100, "obtainedMarks": 78, "grade": "B+"}],
            "status": "Pass"
        }"#;
        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.roll_number(), "STU123");
        assert_eq!(record.subjects[0].obtained_marks, 78.0);
        assert_eq!(record.status, Some(ResultStatus::Pass));
    }

    #[test]
    fn test_result_record_accepts_form_text() {
        let json = r#"{
            "studentInfo": {"fullName": "John Doe", "rollNumber": "STU123", "course": "B.Sc", "semester": "2", "session": "2025"},
            "subjects": [
                {"code": "ENG101", "name": "English", "maxMarks": "100", "obtainedMarks": " 78.5 ", "grade": "B+"},
                {"code": "MAT102", "name": "Maths", "maxMarks": "", "obtainedMarks": null, "grade": ""}
            ],
            "status": ""
        }"#;
        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.subjects[0].max_marks, 100.0);
        assert_eq!(record.subjects[0].obtained_marks, 78.5);
        assert_eq!(record.subjects[1].max_marks, 0.0);
        assert_eq!(record.subjects[1].obtained_marks, 0.0);
        assert_eq!(record.status, None);

        let unknown: ResultRecord =
            serde_json::from_str(r#"{"studentInfo": {"rollNumber": "STU9"}, "status": "Withheld"}"#).unwrap();
        assert_eq!(unknown.status, None);
        assert!(unknown.subjects.is_empty());
        assert!(serde_json::to_value(&unknown).unwrap().get("status").is_none());
    }

    #[test]
    fn test_result_record_rejects_non_numeric_marks() {
        let json = r#"{"studentInfo": {}, "subjects": [{"code": "X", "name": "Y", "maxMarks": "lots", "obtainedMarks": 1}], "status": "Fail"}"#;
        assert!(serde_json::from_str::<ResultRecord>(json).is_err());
    }

    #[test]
    fn test_student_field_from_str() {
        assert_eq!("bloodGroup".parse::<StudentField>(), Ok(StudentField::BloodGroup));
        assert_eq!("blood_group".parse::<StudentField>(), Ok(StudentField::BloodGroup));
        assert!("shoe_size".parse::<StudentField>().is_err());
    }

    #[test]
    fn test_role_defaults_to_student() {
        let user: UserProfile = serde_json::from_str(r#"{"email": "a@b.co"}"#).unwrap();
        assert_eq!(user.role, Role::Student);

        let admin: UserProfile =
            serde_json::from_str(r#"{"email": "a@b.co", "role": "admin"}"#).unwrap();
        assert!(admin.role.is_admin());
    }

    #[test]
    fn test_credentials_serialize_flat() {
        let creds = Credentials::phone("9876543210", "secret");
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["phone"], "9876543210");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_enquiry_matches() {
        let enquiry = Enquiry {
            id: "1".to_string(),
            name: "Ravi Kumar".to_string(),
            email: "ravi@mail.com".to_string(),
            phone: "9000000000".to_string(),
            course: "BSc Nursing".to_string(),
            message: String::new(),
            status: EnquiryStatus::Open,
            created_at: None,
        };
        assert!(enquiry.matches("nursing"));
        assert!(enquiry.matches("  "));
        assert!(!enquiry.matches("pharmacy"));
    }
}
