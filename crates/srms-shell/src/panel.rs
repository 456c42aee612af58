//! The content region.
//!
//! A [`Panel`] is the list of widgets the current view produced. The
//! navigator clears it before every render, so a handler never sees the
//! previous view's widgets.

use srms_core::SqlValue;

use crate::forms::FormId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Heading(String),
    Cards(Vec<Card>),
    Table(Table),
    Notice(Notice),
    Form(FormSpec),
    Actions(Vec<Action>),
}

/// Dashboard summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub value: String,
    pub subtitle: String,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        subtitle: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Rows returned by a list view, with at most one selected row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
    pub selected: Option<usize>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns,
            rows,
            selected: None,
        }
    }

    pub fn selected_row(&self) -> Option<&[SqlValue]> {
        self.selected
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    /// The view's call returned no rows.
    Empty,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Buttons offered by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddUser,
    Approve,
    Deny,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::AddUser => "Add User",
            Action::Approve => "Approve",
            Action::Deny => "Deny",
        }
    }
}

/// Fields a form collects before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub id: FormId,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Read without echo.
    Secret,
    Integer,
    Number,
    /// One of a fixed set of values.
    Choice(Vec<String>),
    LongText,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every widget.
    pub fn clear(&mut self) {
        self.widgets.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn push(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    pub fn heading(&mut self, text: impl Into<String>) {
        self.push(Widget::Heading(text.into()));
    }

    pub fn notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.push(Widget::Notice(Notice {
            kind,
            text: text.into(),
        }));
    }

    pub fn title(&self) -> Option<&str> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&Table> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn table_mut(&mut self) -> Option<&mut Table> {
        self.widgets.iter_mut().find_map(|w| match w {
            Widget::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.widgets.iter().filter_map(|w| match w {
            Widget::Notice(notice) => Some(notice),
            _ => None,
        })
    }

    pub fn form(&self) -> Option<&FormSpec> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Form(form) => Some(form),
            _ => None,
        })
    }

    pub fn actions(&self) -> &[Action] {
        self.widgets
            .iter()
            .find_map(|w| match w {
                Widget::Actions(actions) => Some(actions.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn cards(&self) -> &[Card] {
        self.widgets
            .iter()
            .find_map(|w| match w {
                Widget::Cards(cards) => Some(cards.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_every_widget() {
        let mut panel = Panel::new();
        panel.heading("Grades View");
        panel.push(Widget::Table(Table::new(vec!["Grade".into()], vec![])));
        panel.notice(NoticeKind::Info, "hello");
        assert_eq!(panel.widgets().len(), 3);

        panel.clear();
        assert!(panel.is_empty());
        assert!(panel.table().is_none());
        assert!(panel.title().is_none());
    }

    #[test]
    fn test_selected_row() {
        let mut table = Table::new(
            vec!["RequestID".into()],
            vec![vec![SqlValue::Int(4)], vec![SqlValue::Int(9)]],
        );
        assert!(table.selected_row().is_none());
        table.selected = Some(1);
        assert_eq!(table.selected_row(), Some(&[SqlValue::Int(9)][..]));
        table.selected = Some(5);
        assert!(table.selected_row().is_none());
    }
}
