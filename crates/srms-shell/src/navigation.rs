//! The role -> views table.
//!
//! Fixed at compile time. Each [`ViewId`] carries its sidebar label and is
//! dispatched to exactly one handler in [`crate::views`].

use srms_core::Role;
use std::fmt;

/// A named view in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Dashboard,
    Users,
    RoleRequests,
    Students,
    Courses,
    Grades,
    Attendance,
    MyCourses,
    EnterGrades,
    ViewGrades,
    MyGrades,
    MyAttendance,
    RequestUpgrade,
    PublicCourses,
}

impl ViewId {
    pub const ALL: [ViewId; 14] = [
        ViewId::Dashboard,
        ViewId::Users,
        ViewId::RoleRequests,
        ViewId::Students,
        ViewId::Courses,
        ViewId::Grades,
        ViewId::Attendance,
        ViewId::MyCourses,
        ViewId::EnterGrades,
        ViewId::ViewGrades,
        ViewId::MyGrades,
        ViewId::MyAttendance,
        ViewId::RequestUpgrade,
        ViewId::PublicCourses,
    ];

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::Users => "Users",
            ViewId::RoleRequests => "Role Requests",
            ViewId::Students => "Students",
            ViewId::Courses => "Courses",
            ViewId::Grades => "Grades",
            ViewId::Attendance => "Attendance",
            ViewId::MyCourses => "My Courses",
            ViewId::EnterGrades => "Enter Grades",
            ViewId::ViewGrades => "View Grades",
            ViewId::MyGrades => "My Grades",
            ViewId::MyAttendance => "My Attendance",
            ViewId::RequestUpgrade => "Request Upgrade",
            ViewId::PublicCourses => "View Courses",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Views reachable by `role`, in sidebar order.
pub fn navigation(role: Role) -> &'static [ViewId] {
    match role {
        Role::Admin => &[
            ViewId::Dashboard,
            ViewId::Users,
            ViewId::RoleRequests,
            ViewId::Students,
            ViewId::Courses,
            ViewId::Grades,
            ViewId::Attendance,
        ],
        Role::Instructor => &[
            ViewId::Dashboard,
            ViewId::MyCourses,
            ViewId::EnterGrades,
            ViewId::ViewGrades,
            ViewId::Attendance,
        ],
        Role::Ta => &[
            ViewId::Dashboard,
            ViewId::MyCourses,
            ViewId::Attendance,
            ViewId::RequestUpgrade,
        ],
        Role::Student => &[
            ViewId::Dashboard,
            ViewId::MyCourses,
            ViewId::MyGrades,
            ViewId::MyAttendance,
            ViewId::RequestUpgrade,
        ],
        Role::Guest => &[ViewId::Dashboard, ViewId::PublicCourses],
    }
}

/// Whether `role` may open `view`.
pub fn is_permitted(role: Role, view: ViewId) -> bool {
    navigation(role).contains(&view)
}
