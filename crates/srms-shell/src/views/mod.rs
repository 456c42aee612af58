//! Per-view handlers.
//!
//! Each [`ViewId`] maps to exactly one handler: the dashboard, a list view
//! (one gateway call rendered as a table), or a form view (an empty form
//! submitted later through [`Navigator::submit`](crate::Navigator::submit)).

mod dashboard;
mod lists;

use srms_core::Session;
use srms_gateway::ProcedureGateway;

use crate::error::ShellError;
use crate::forms::FormId;
use crate::navigation::ViewId;
use crate::panel::{Panel, Widget};

use lists::ListView;

/// Fill `panel` with `view`. The panel is expected to be empty.
pub(crate) async fn render<G: ProcedureGateway>(
    view: ViewId,
    session: &Session,
    gateway: &mut G,
    panel: &mut Panel,
) -> Result<(), ShellError> {
    match view {
        ViewId::Dashboard => {
            dashboard::render(session, panel);
            Ok(())
        }
        ViewId::EnterGrades => {
            form(FormId::EnterGrade, session, panel);
            Ok(())
        }
        ViewId::RequestUpgrade => {
            form(FormId::RoleRequest, session, panel);
            Ok(())
        }
        _ => match ListView::for_view(view, session) {
            Some(list) => lists::render(list, gateway, panel).await,
            None => Ok(()),
        },
    }
}

fn form(id: FormId, session: &Session, panel: &mut Panel) {
    let spec = id.spec(session.role());
    panel.heading(spec.title.clone());
    panel.push(Widget::Form(spec));
}
