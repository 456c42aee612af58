//! Form definitions and local validation.
//!
//! Each form has a field layout ([`FormId::spec`]) and a typed parser that
//! turns raw [`FormValues`] into the arguments of exactly one procedure
//! call. A parse failure is a [`ShellError::Validation`] and the navigator
//! makes no call.

use srms_core::Role;
use std::collections::BTreeMap;

use crate::error::ShellError;
use crate::navigation::ViewId;
use crate::panel::{FieldKind, FieldSpec, FormSpec};

const INVALID_INPUT: &str = "Invalid input";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    /// Admin "Add User" dialog on the Users view.
    NewUser,
    EnterGrade,
    RoleRequest,
}

impl FormId {
    /// The view a form belongs to. Submitting requires that view to be
    /// permitted for the session role.
    pub fn view(&self) -> ViewId {
        match self {
            FormId::NewUser => ViewId::Users,
            FormId::EnterGrade => ViewId::EnterGrades,
            FormId::RoleRequest => ViewId::RequestUpgrade,
        }
    }

    /// Field layout for `role`. Only the role request form depends on it.
    pub fn spec(&self, role: Role) -> FormSpec {
        match self {
            FormId::NewUser => FormSpec {
                id: *self,
                title: "Create New User".to_string(),
                fields: vec![
                    field("username", "Username", FieldKind::Text, true),
                    field("password", "Password", FieldKind::Secret, true),
                    field(
                        "role",
                        "Role",
                        FieldKind::Choice(Role::ALL.iter().map(|r| r.as_str().to_string()).collect()),
                        true,
                    ),
                ],
            },
            FormId::EnterGrade => FormSpec {
                id: *self,
                title: "Enter Grades".to_string(),
                fields: vec![
                    field("student_id", "Student ID", FieldKind::Integer, true),
                    field("course_id", "Course ID", FieldKind::Integer, true),
                    field("grade", "Grade (0-100)", FieldKind::Number, true),
                ],
            },
            FormId::RoleRequest => FormSpec {
                id: *self,
                title: "Request Role Upgrade".to_string(),
                fields: vec![
                    field(
                        "role",
                        "Requested Role",
                        FieldKind::Choice(
                            role.upgrade_targets()
                                .iter()
                                .map(|r| r.as_str().to_string())
                                .collect(),
                        ),
                        true,
                    ),
                    field("reason", "Reason", FieldKind::LongText, true),
                    field("comments", "Comments", FieldKind::LongText, false),
                ],
            },
        }
    }
}

fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
    }
}

/// Raw text entered into a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// The entered value, or `""` when the field was never set.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn present(&self, name: &str) -> bool {
        !self.get(name).trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub fn parse(values: &FormValues) -> Result<Self, ShellError> {
        if !["username", "password", "role"].iter().all(|f| values.present(f)) {
            return Err(ShellError::validation("All fields required"));
        }
        let role = values
            .get("role")
            .parse::<Role>()
            .map_err(|e| ShellError::validation(e.to_string()))?;
        Ok(Self {
            username: values.get("username").trim().to_string(),
            password: values.get("password").to_string(),
            role,
        })
    }
}

/// A grade to record. The grade is any finite number; range checks are
/// left to `sp_EnterGrade`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntry {
    pub student_id: i64,
    pub course_id: i64,
    pub grade: f64,
}

impl GradeEntry {
    pub fn parse(values: &FormValues) -> Result<Self, ShellError> {
        let student_id = parse_integer(values, "student_id", "Student ID")?;
        let course_id = parse_integer(values, "course_id", "Course ID")?;
        let grade = values
            .get("grade")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|g| g.is_finite())
            .ok_or_else(|| ShellError::validation(format!("{INVALID_INPUT}: Grade must be a number")))?;
        Ok(Self {
            student_id,
            course_id,
            grade,
        })
    }
}

fn parse_integer(values: &FormValues, name: &str, label: &str) -> Result<i64, ShellError> {
    values.get(name).trim().parse::<i64>().map_err(|_| {
        ShellError::validation(format!("{INVALID_INPUT}: {label} must be a whole number"))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    pub requested: Role,
    pub reason: String,
    pub comments: String,
}

impl UpgradeRequest {
    /// Parse a request made by a user currently holding `current`.
    pub fn parse(values: &FormValues, current: Role) -> Result<Self, ShellError> {
        if !values.present("role") || !values.present("reason") {
            return Err(ShellError::validation("Fill required fields"));
        }
        let requested = values
            .get("role")
            .parse::<Role>()
            .map_err(|e| ShellError::validation(e.to_string()))?;
        if !current.upgrade_targets().contains(&requested) {
            return Err(ShellError::validation(format!(
                "{current} cannot request the {requested} role"
            )));
        }
        Ok(Self {
            requested,
            reason: values.get("reason").to_string(),
            comments: values.get("comments").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_requires_every_field() {
        let values = FormValues::new().with("username", "jdoe").with("role", "Student");
        let err = NewUser::parse(&values).unwrap_err();
        assert_eq!(err.to_string(), "All fields required");

        let values = values.with("password", "pw");
        let user = NewUser::parse(&values).unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.role.default_clearance().level(), 1);
    }

    #[test]
    fn test_new_user_rejects_unknown_role() {
        let values = FormValues::new()
            .with("username", "jdoe")
            .with("password", "pw")
            .with("role", "Dean");
        assert!(matches!(NewUser::parse(&values), Err(ShellError::Validation(_))));
    }

    #[test]
    fn test_grade_must_be_numeric() {
        let values = FormValues::new()
            .with("student_id", "12")
            .with("course_id", "3")
            .with("grade", "A+");
        let err = GradeEntry::parse(&values).unwrap_err();
        assert!(err.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_grade_is_not_clamped() {
        let values = FormValues::new()
            .with("student_id", " 12 ")
            .with("course_id", "3")
            .with("grade", "104.5");
        let entry = GradeEntry::parse(&values).unwrap();
        assert_eq!(entry.student_id, 12);
        assert_eq!(entry.grade, 104.5);
    }

    #[test]
    fn test_grade_rejects_nan() {
        let values = FormValues::new()
            .with("student_id", "1")
            .with("course_id", "1")
            .with("grade", "NaN");
        assert!(GradeEntry::parse(&values).is_err());
    }

    #[test]
    fn test_ids_must_be_integers() {
        let values = FormValues::new()
            .with("student_id", "1.5")
            .with("course_id", "1")
            .with("grade", "90");
        let err = GradeEntry::parse(&values).unwrap_err();
        assert!(err.to_string().contains("Student ID"));
    }

    #[test]
    fn test_upgrade_request_limited_to_targets() {
        let values = FormValues::new().with("role", "Admin").with("reason", "promotion");
        assert!(UpgradeRequest::parse(&values, Role::Student).is_err());

        let values = values.with("role", "TA");
        let request = UpgradeRequest::parse(&values, Role::Student).unwrap();
        assert_eq!(request.requested, Role::Ta);
        assert_eq!(request.comments, "");

        assert!(UpgradeRequest::parse(&values, Role::Ta).is_err());
    }

    #[test]
    fn test_upgrade_request_needs_reason() {
        let values = FormValues::new().with("role", "Instructor").with("reason", "   ");
        let err = UpgradeRequest::parse(&values, Role::Ta).unwrap_err();
        assert_eq!(err.to_string(), "Fill required fields");
    }

    #[test]
    fn test_role_request_choices_follow_role() {
        let spec = FormId::RoleRequest.spec(Role::Ta);
        assert_eq!(spec.fields[0].kind, FieldKind::Choice(vec!["Instructor".to_string()]));
        assert_eq!(FormId::RoleRequest.view(), ViewId::RequestUpgrade);
    }
}
