//! Read-only table views.
//!
//! Every list view is one gateway call built from the session. Rows become a
//! [`Table`]; zero rows become an empty-state notice.

use srms_core::{Role, Session};
use srms_gateway::contract;
use srms_gateway::{Call, ProcedureGateway};
use tracing::{debug, warn};

use crate::error::ShellError;
use crate::navigation::ViewId;
use crate::panel::{Action, NoticeKind, Panel, Table, Widget};

/// How one list view is fetched and laid out.
#[derive(Debug)]
pub(crate) struct ListView {
    pub view: ViewId,
    pub title: &'static str,
    pub call: Call,
    /// Display headers replacing the returned column names.
    pub headers: Option<&'static [&'static str]>,
    pub empty: &'static str,
    /// Offered whatever the call returns.
    pub actions: &'static [Action],
    /// Offered only when there are rows to act on.
    pub row_actions: &'static [Action],
}

const USER_HEADERS: &[&str] = &["UserID", "Username", "Role", "Clearance", "Active", "Last Login"];
const STUDENT_HEADERS: &[&str] = &["ID", "Name", "Email", "Department"];

impl ListView {
    fn new(view: ViewId, title: &'static str, call: Call, empty: &'static str) -> Self {
        Self {
            view,
            title,
            call,
            headers: None,
            empty,
            actions: &[],
            row_actions: &[],
        }
    }

    fn headers(mut self, headers: &'static [&'static str]) -> Self {
        self.headers = Some(headers);
        self
    }

    fn actions(mut self, actions: &'static [Action]) -> Self {
        self.actions = actions;
        self
    }

    fn row_actions(mut self, actions: &'static [Action]) -> Self {
        self.row_actions = actions;
        self
    }

    /// The list definition for `view`, or `None` if it is not a list view.
    pub fn for_view(view: ViewId, session: &Session) -> Option<Self> {
        let user_id = session.user_id();
        let list = match view {
            ViewId::Users => ListView::new(view, "User Management", contract::list_users(), "No users found")
                .headers(USER_HEADERS)
                .actions(&[Action::AddUser]),
            ViewId::RoleRequests => ListView::new(
                view,
                "Role Requests",
                contract::view_pending_role_requests(user_id),
                "No pending requests",
            )
            .row_actions(&[Action::Approve, Action::Deny]),
            ViewId::Students => ListView::new(
                view,
                "Student Management",
                contract::list_students(),
                "No students found",
            )
            .headers(STUDENT_HEADERS),
            ViewId::Courses => ListView::new(
                view,
                "Course Management",
                contract::view_courses(user_id, session.role()),
                "No courses available",
            ),
            ViewId::MyCourses => ListView::new(
                view,
                "My Courses",
                contract::view_courses(user_id, session.role()),
                "No courses available",
            ),
            ViewId::PublicCourses => ListView::new(
                view,
                "Available Courses",
                contract::view_courses(user_id, Role::Guest),
                "No courses available",
            ),
            ViewId::Grades | ViewId::ViewGrades => ListView::new(
                view,
                "Grades View",
                contract::view_grades(user_id, session.clearance()),
                "No grades available or insufficient clearance",
            ),
            ViewId::Attendance => ListView::new(
                view,
                "Attendance Management",
                contract::view_attendance(user_id, session.clearance()),
                "No attendance records",
            ),
            ViewId::MyGrades => ListView::new(
                view,
                "My Grades",
                contract::student_view_own_grades(user_id),
                "No grades available",
            ),
            ViewId::MyAttendance => ListView::new(
                view,
                "My Attendance",
                contract::student_view_own_attendance(user_id),
                "No attendance records",
            ),
            ViewId::Dashboard | ViewId::EnterGrades | ViewId::RequestUpgrade => return None,
        };
        Some(list)
    }
}

/// Fetch and lay out a list view.
///
/// Procedure failures are shown in the panel and logged. A connectivity
/// failure is returned so the session can be halted.
pub(crate) async fn render<G: ProcedureGateway>(
    list: ListView,
    gateway: &mut G,
    panel: &mut Panel,
) -> Result<(), ShellError> {
    panel.heading(list.title);

    let has_rows = match gateway.invoke(&list.call).await {
        Ok(rs) if rs.is_empty() => {
            debug!(view = %list.view, "No rows");
            panel.notice(NoticeKind::Empty, list.empty);
            false
        }
        Ok(rs) => {
            let (columns, rows) = rs.into_parts();
            let columns = match list.headers {
                Some(headers) if headers.len() == columns.len() => {
                    headers.iter().map(|h| h.to_string()).collect()
                }
                _ => columns,
            };
            panel.push(Widget::Table(Table::new(columns, rows)));
            true
        }
        Err(e) if e.is_connectivity() => return Err(e.into()),
        Err(e) => {
            warn!(view = %list.view, call = list.call.label(), error = %e, "View query failed");
            panel.notice(NoticeKind::Error, e.to_string());
            false
        }
    };

    let mut actions = list.actions.to_vec();
    if has_rows {
        actions.extend_from_slice(list.row_actions);
    }
    if !actions.is_empty() {
        panel.push(Widget::Actions(actions));
    }
    Ok(())
}
