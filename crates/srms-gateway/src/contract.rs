//! The procedure catalog.
//!
//! Procedure names, parameter order and status field names are the wire
//! format shared with the records database and must not drift. Every call
//! the console makes is built here.

use srms_core::{ClearanceLevel, Role, SqlValue};

use crate::call::Call;
use crate::result::ResultSet;

pub const SP_LOGIN: &str = "sp_Login";
pub const SP_REGISTER_USER: &str = "sp_RegisterUser";
pub const SP_VIEW_PENDING_ROLE_REQUESTS: &str = "sp_ViewPendingRoleRequests";
pub const SP_PROCESS_ROLE_REQUEST: &str = "sp_ProcessRoleRequest";
pub const SP_SUBMIT_ROLE_REQUEST: &str = "sp_SubmitRoleRequest";
pub const SP_VIEW_COURSES: &str = "sp_ViewCourses";
pub const SP_VIEW_GRADES: &str = "sp_ViewGrades";
pub const SP_ENTER_GRADE: &str = "sp_EnterGrade";
pub const SP_VIEW_ATTENDANCE: &str = "sp_ViewAttendance";
pub const SP_STUDENT_VIEW_OWN_GRADES: &str = "sp_StudentViewOwnGrades";
pub const SP_STUDENT_VIEW_OWN_ATTENDANCE: &str = "sp_StudentViewOwnAttendance";

pub const LIST_USERS_SQL: &str = r#"SELECT "UserID", "Username", "Role", "ClearanceLevel", "IsActive", "LastLogin" FROM "Users""#;
pub const LIST_STUDENTS_SQL: &str =
    r#"SELECT "StudentID", "FullName", "Email", "Department" FROM "Student""#;

/// Value of the `Result` field on success.
pub const STATUS_SUCCESS: &str = "Success";

const RESULT_FIELD: &str = "Result";
const MESSAGE_FIELD: &str = "Message";
const ERROR_MESSAGE_FIELD: &str = "ErrorMessage";

/// Decision recorded against a pending role request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "Approve",
            Decision::Deny => "Deny",
        }
    }
}

/// Status row returned by mutating procedures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub result: String,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

impl StatusRecord {
    /// Decode the first row. Falls back to the first column when the
    /// procedure does not name its status column `Result`.
    pub fn from_result(rs: &ResultSet) -> Option<Self> {
        let row = rs.first_row()?;
        let result = row
            .get_string(RESULT_FIELD)
            .or_else(|| row.cell(0).filter(|v| !v.is_null()).map(|v| v.to_string()))?;
        Some(Self {
            result,
            message: row.get_string(MESSAGE_FIELD),
            error_message: row.get_string(ERROR_MESSAGE_FIELD),
        })
    }

    pub fn is_success(&self) -> bool {
        self.result == STATUS_SUCCESS
    }
}

/// Row returned by `sp_Login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRecord {
    pub result: String,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub clearance_level: Option<i64>,
    pub message: Option<String>,
}

impl LoginRecord {
    pub fn from_result(rs: &ResultSet) -> Option<Self> {
        let row = rs.first_row()?;
        Some(Self {
            result: row.get_string(RESULT_FIELD).unwrap_or_default(),
            user_id: row.get_i64("UserID"),
            username: row.get_string("Username"),
            role: row.get_string("Role"),
            clearance_level: row.get_i64("ClearanceLevel"),
            message: row.get_string(MESSAGE_FIELD),
        })
    }

    pub fn is_success(&self) -> bool {
        self.result == STATUS_SUCCESS
    }
}

/// Database ids are `INT`; fall back to a wide integer only if one ever overflows.
fn id(value: i64) -> SqlValue {
    match i32::try_from(value) {
        Ok(v) => SqlValue::Int(v),
        Err(_) => SqlValue::BigInt(value),
    }
}

fn clearance(level: ClearanceLevel) -> SqlValue {
    SqlValue::Int(i32::from(level.level()))
}

pub fn login(username: &str, password: &str) -> Call {
    Call::procedure(SP_LOGIN, vec![username.into(), password.into()])
}

pub fn register_user(
    username: &str,
    password: &str,
    role: Role,
    level: ClearanceLevel,
    created_by: i64,
) -> Call {
    Call::procedure(
        SP_REGISTER_USER,
        vec![
            username.into(),
            password.into(),
            role.as_str().into(),
            clearance(level),
            id(created_by),
        ],
    )
}

pub fn view_pending_role_requests(user_id: i64) -> Call {
    Call::procedure(SP_VIEW_PENDING_ROLE_REQUESTS, vec![id(user_id)])
}

pub fn process_role_request(
    request_id: i64,
    acting_user_id: i64,
    decision: Decision,
    comment: Option<String>,
) -> Call {
    Call::procedure(
        SP_PROCESS_ROLE_REQUEST,
        vec![
            id(request_id),
            id(acting_user_id),
            decision.as_str().into(),
            comment.into(),
        ],
    )
}

pub fn submit_role_request(user_id: i64, requested: Role, reason: &str, comments: &str) -> Call {
    Call::procedure(
        SP_SUBMIT_ROLE_REQUEST,
        vec![
            id(user_id),
            requested.as_str().into(),
            reason.into(),
            comments.into(),
        ],
    )
}

pub fn view_courses(user_id: i64, role: Role) -> Call {
    Call::procedure(SP_VIEW_COURSES, vec![id(user_id), role.as_str().into()])
}

pub fn view_grades(user_id: i64, level: ClearanceLevel) -> Call {
    Call::procedure(
        SP_VIEW_GRADES,
        vec![
            SqlValue::null_int(),
            SqlValue::null_int(),
            id(user_id),
            clearance(level),
        ],
    )
}

pub fn enter_grade(
    student_id: i64,
    course_id: i64,
    grade: f64,
    user_id: i64,
    level: ClearanceLevel,
) -> Call {
    Call::procedure(
        SP_ENTER_GRADE,
        vec![
            id(student_id),
            id(course_id),
            SqlValue::Float(grade),
            id(user_id),
            clearance(level),
        ],
    )
}

pub fn view_attendance(user_id: i64, level: ClearanceLevel) -> Call {
    Call::procedure(
        SP_VIEW_ATTENDANCE,
        vec![
            SqlValue::null_int(),
            SqlValue::null_int(),
            id(user_id),
            clearance(level),
        ],
    )
}

pub fn student_view_own_grades(user_id: i64) -> Call {
    Call::procedure(SP_STUDENT_VIEW_OWN_GRADES, vec![id(user_id)])
}

pub fn student_view_own_attendance(user_id: i64) -> Call {
    Call::procedure(
        SP_STUDENT_VIEW_OWN_ATTENDANCE,
        vec![id(user_id), SqlValue::null_int()],
    )
}

pub fn list_users() -> Call {
    Call::query(LIST_USERS_SQL)
}

pub fn list_students() -> Call {
    Call::query(LIST_STUDENTS_SQL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_set(columns: &[&str], cells: Vec<SqlValue>) -> ResultSet {
        ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), vec![cells])
    }

    #[test]
    fn test_status_record_reads_named_fields() {
        let rs = status_set(
            &["Result", "ErrorMessage"],
            vec!["Failed".into(), "Grade out of range".into()],
        );
        let status = StatusRecord::from_result(&rs).unwrap();
        assert!(!status.is_success());
        assert_eq!(status.error_message.as_deref(), Some("Grade out of range"));
        assert_eq!(status.message, None);
    }

    #[test]
    fn test_status_record_falls_back_to_first_column() {
        let rs = status_set(&["status"], vec!["Success".into()]);
        assert!(StatusRecord::from_result(&rs).unwrap().is_success());
    }

    #[test]
    fn test_status_record_absent_for_empty_result() {
        assert_eq!(StatusRecord::from_result(&ResultSet::empty()), None);
    }

    #[test]
    fn test_login_record_decodes_identity() {
        let rs = status_set(
            &["Result", "UserID", "Username", "Role", "ClearanceLevel"],
            vec![
                "Success".into(),
                SqlValue::Int(1),
                "admin1".into(),
                "Admin".into(),
                SqlValue::Int(4),
            ],
        );
        let record = LoginRecord::from_result(&rs).unwrap();
        assert!(record.is_success());
        assert_eq!(record.user_id, Some(1));
        assert_eq!(record.role.as_deref(), Some("Admin"));
        assert_eq!(record.clearance_level, Some(4));
    }

    #[test]
    fn test_parameter_order_is_preserved() {
        let call = enter_grade(12, 3, 88.5, 7, ClearanceLevel::SECRET);
        assert_eq!(call.procedure_name(), Some(SP_ENTER_GRADE));
        assert_eq!(
            call.params(),
            &[
                SqlValue::Int(12),
                SqlValue::Int(3),
                SqlValue::Float(88.5),
                SqlValue::Int(7),
                SqlValue::Int(3),
            ]
        );

        let call = view_grades(7, ClearanceLevel::TOP_SECRET);
        assert!(call.params()[0].is_null());
        assert!(call.params()[1].is_null());
        assert_eq!(call.params()[2], SqlValue::Int(7));

        let call = process_role_request(5, 1, Decision::Deny, None);
        assert_eq!(call.params()[2], SqlValue::from("Deny"));
        assert!(call.params()[3].is_null());
    }

    #[test]
    fn test_oversized_ids_widen() {
        let call = view_pending_role_requests(i64::from(i32::MAX) + 1);
        assert_eq!(call.params(), &[SqlValue::BigInt(i64::from(i32::MAX) + 1)]);
    }
}
