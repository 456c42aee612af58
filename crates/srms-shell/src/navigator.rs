//! The navigation dispatcher.
//!
//! A [`Navigator`] exists only while a user is logged in. It owns the
//! session, the gateway connection and the content panel; dropping it
//! through [`Navigator::logout`] closes the connection.

use srms_core::{Session, SqlValue};
use srms_gateway::contract::{self, Decision, StatusRecord};
use srms_gateway::{Call, ProcedureGateway};
use tracing::{info, warn};

use crate::error::ShellError;
use crate::forms::{FormId, FormValues, GradeEntry, NewUser, UpgradeRequest};
use crate::navigation::{self, ViewId};
use crate::panel::{NoticeKind, Panel};
use crate::views;

pub struct Navigator<G> {
    session: Session,
    gateway: G,
    panel: Panel,
    current: ViewId,
}

impl<G: ProcedureGateway> Navigator<G> {
    /// Wrap a fresh session without rendering anything.
    pub fn new(session: Session, gateway: G) -> Self {
        Self {
            session,
            gateway,
            panel: Panel::new(),
            current: ViewId::Dashboard,
        }
    }

    /// Create a navigator and render the dashboard.
    pub async fn start(session: Session, gateway: G) -> Result<Self, ShellError> {
        let mut navigator = Self::new(session, gateway);
        navigator.render(ViewId::Dashboard).await?;
        Ok(navigator)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sidebar entries for the session role.
    pub fn views(&self) -> &'static [ViewId] {
        navigation::navigation(self.session.role())
    }

    pub fn is_permitted(&self, view: ViewId) -> bool {
        navigation::is_permitted(self.session.role(), view)
    }

    pub fn current_view(&self) -> ViewId {
        self.current
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    fn ensure_permitted(&self, view: ViewId) -> Result<(), ShellError> {
        if self.is_permitted(view) {
            return Ok(());
        }
        warn!(
            user_id = self.session.user_id(),
            role = %self.session.role(),
            view = %view,
            "View not permitted"
        );
        Err(ShellError::ViewNotPermitted {
            view,
            role: self.session.role(),
        })
    }

    /// Replace the panel contents with `view`.
    ///
    /// A view outside the role's navigation is rejected before anything is
    /// cleared or called.
    pub async fn render(&mut self, view: ViewId) -> Result<(), ShellError> {
        self.ensure_permitted(view)?;
        info!(
            user_id = self.session.user_id(),
            role = %self.session.role(),
            view = %view,
            "Rendering view"
        );

        self.panel.clear();
        self.current = view;
        views::render(view, &self.session, &mut self.gateway, &mut self.panel).await
    }

    /// Select a row of the current table, zero-based.
    pub fn select(&mut self, row: usize) -> Result<(), ShellError> {
        let table = self
            .panel
            .table_mut()
            .ok_or_else(|| ShellError::validation("Nothing to select"))?;
        if row >= table.rows.len() {
            return Err(ShellError::validation(format!("No row {}", row + 1)));
        }
        table.selected = Some(row);
        Ok(())
    }

    /// Approve or deny the selected role request.
    ///
    /// The Role Requests view is re-rendered afterwards whatever the
    /// outcome, which also clears the selection.
    pub async fn decide(
        &mut self,
        decision: Decision,
        comment: Option<String>,
    ) -> Result<String, ShellError> {
        if self.current != ViewId::RoleRequests {
            return Err(ShellError::validation("Open Role Requests first"));
        }
        self.ensure_permitted(ViewId::RoleRequests)?;

        let request_id = self
            .panel
            .table()
            .and_then(|t| t.selected_row())
            .and_then(|row| row.first())
            .and_then(SqlValue::as_i64)
            .ok_or_else(|| ShellError::validation("Select a request"))?;

        let call = contract::process_role_request(
            request_id,
            self.session.user_id(),
            decision,
            comment,
        );
        let outcome = self.gateway.invoke(&call).await;
        if let Err(e) = &outcome
            && e.is_connectivity()
        {
            return Err(ShellError::Connectivity(e.to_string()));
        }

        self.render(ViewId::RoleRequests).await?;

        let rs = outcome?;
        if let Some(status) = StatusRecord::from_result(&rs)
            && !status.is_success()
        {
            return Err(ShellError::procedure(
                status
                    .error_message
                    .or(status.message)
                    .unwrap_or_else(|| "Failed to process request".to_string()),
            ));
        }

        info!(
            request_id,
            decision = decision.as_str(),
            user_id = self.session.user_id(),
            "Role request processed"
        );
        let message = match decision {
            Decision::Approve => "Request approved",
            Decision::Deny => "Request denied",
        };
        self.panel.notice(NoticeKind::Success, message);
        Ok(message.to_string())
    }

    /// Validate and submit a form.
    ///
    /// The form's view must be the one on screen. Invalid input makes no call. On success the values are cleared and
    /// the success message is returned; a failed status becomes
    /// [`ShellError::Procedure`] carrying the procedure's `ErrorMessage`.
    pub async fn submit(
        &mut self,
        form: FormId,
        values: &mut FormValues,
    ) -> Result<String, ShellError> {
        self.ensure_permitted(form.view())?;
        if self.current != form.view() {
            return Err(ShellError::validation(format!("Open {} first", form.view())));
        }

        let submission = self.prepare(form, values)?;
        let rs = self.gateway.invoke(&submission.call).await?;
        let status = StatusRecord::from_result(&rs);

        let status = match status {
            Some(status) if status.is_success() => status,
            Some(status) => {
                warn!(form = ?form, result = %status.result, "Form rejected");
                return Err(ShellError::procedure(
                    status
                        .error_message
                        .unwrap_or_else(|| submission.fallback.to_string()),
                ));
            }
            None => return Err(ShellError::procedure(submission.fallback)),
        };

        values.clear();
        info!(form = ?form, user_id = self.session.user_id(), "Form submitted");

        let message = match form {
            FormId::RoleRequest => status
                .message
                .unwrap_or_else(|| submission.success.to_string()),
            _ => submission.success.to_string(),
        };
        if form == FormId::NewUser {
            self.render(ViewId::Users).await?;
        }
        self.panel.notice(NoticeKind::Success, message.clone());
        Ok(message)
    }

    fn prepare(&self, form: FormId, values: &FormValues) -> Result<Submission, ShellError> {
        let user_id = self.session.user_id();
        let submission = match form {
            FormId::NewUser => {
                let user = NewUser::parse(values)?;
                Submission {
                    call: contract::register_user(
                        &user.username,
                        &user.password,
                        user.role,
                        user.role.default_clearance(),
                        user_id,
                    ),
                    success: "User created!",
                    fallback: "Failed to create user",
                }
            }
            FormId::EnterGrade => {
                let entry = GradeEntry::parse(values)?;
                Submission {
                    call: contract::enter_grade(
                        entry.student_id,
                        entry.course_id,
                        entry.grade,
                        user_id,
                        self.session.clearance(),
                    ),
                    success: "Grade entered successfully",
                    fallback: "Failed to enter grade",
                }
            }
            FormId::RoleRequest => {
                let request = UpgradeRequest::parse(values, self.session.role())?;
                Submission {
                    call: contract::submit_role_request(
                        user_id,
                        request.requested,
                        &request.reason,
                        &request.comments,
                    ),
                    success: "Request submitted",
                    fallback: "Failed to submit request",
                }
            }
        };
        Ok(submission)
    }

    /// End the session and close the connection.
    pub async fn logout(self) -> Result<(), ShellError> {
        info!(user_id = self.session.user_id(), "Logging out");
        self.gateway.close().await.map_err(ShellError::from)
    }
}

struct Submission {
    call: Call,
    success: &'static str,
    fallback: &'static str,
}
