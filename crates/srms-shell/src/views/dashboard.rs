//! The landing view. Built from the session alone.

use chrono::Local;
use srms_core::Session;

use crate::panel::{Card, Panel, Widget};

pub(crate) fn render(session: &Session, panel: &mut Panel) {
    let clearance = session.clearance();
    let login_time = session
        .logged_in_at()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    panel.heading(format!("{} Dashboard", session.role()));
    panel.push(Widget::Cards(vec![
        Card::new(
            "Clearance",
            format!("Level {}", clearance.level()),
            clearance.name(),
        ),
        Card::new("Role", session.role().as_str(), "Active"),
        Card::new("Status", "Logged In", login_time),
    ]));
}
