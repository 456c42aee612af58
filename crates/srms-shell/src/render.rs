//! Terminal rendering of the header, sidebar and content panel.

use colored::Colorize;
use srms_core::{Session, ShellConfig};

use crate::navigation::ViewId;
use crate::panel::{Card, Notice, NoticeKind, Panel, Table, Widget};

/// Turns panels into printable text.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    max_column_width: usize,
}

impl Renderer {
    pub fn new(color: bool, max_column_width: usize) -> Self {
        Self {
            color,
            max_column_width: max_column_width.max(4),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.color, config.max_column_width)
    }

    /// Truncate to `max_width` characters, ending in `...` when cut.
    fn truncate_value(value: &str, max_width: usize) -> String {
        if value.chars().count() <= max_width {
            value.to_string()
        } else if max_width <= 3 {
            value.chars().take(max_width).collect()
        } else {
            let take = max_width - 3;
            format!("{}...", value.chars().take(take).collect::<String>())
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// One-line banner with the logged-in identity.
    pub fn header(&self, session: &Session) -> String {
        let clearance = session.clearance();
        format!(
            "{} | {} ({}) | Clearance: Level {} - {}",
            self.bold("SRMS"),
            session.username(),
            session.role(),
            clearance.level(),
            clearance.name()
        )
    }

    /// Numbered menu, one view per line, current view marked.
    pub fn sidebar(&self, views: &[ViewId], current: ViewId) -> String {
        let mut out = String::new();
        for (i, view) in views.iter().enumerate() {
            let marker = if *view == current { '>' } else { ' ' };
            let line = format!("{marker} {:>2}. {}", i + 1, view.label());
            if *view == current {
                out.push_str(&self.bold(&line));
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }
        out
    }

    /// The full content region.
    pub fn panel(&self, panel: &Panel) -> String {
        let mut out = String::new();
        for widget in panel.widgets() {
            match widget {
                Widget::Heading(text) => {
                    out.push_str(&self.bold(text));
                    out.push_str("\n\n");
                }
                Widget::Cards(cards) => out.push_str(&self.cards(cards)),
                Widget::Table(table) => out.push_str(&self.table(table)),
                Widget::Notice(notice) => out.push_str(&self.notice(notice)),
                Widget::Form(form) => {
                    out.push_str(&self.dim(&format!(
                        "Form \"{}\": {}",
                        form.title,
                        form.fields
                            .iter()
                            .map(|f| if f.required {
                                format!("{}*", f.label)
                            } else {
                                f.label.to_string()
                            })
                            .collect::<Vec<_>>()
                            .join(", ")
                    )));
                    out.push('\n');
                }
                Widget::Actions(actions) => {
                    let labels: Vec<String> =
                        actions.iter().map(|a| format!("[{}]", a.label())).collect();
                    out.push_str(&labels.join(" "));
                    out.push('\n');
                }
            }
        }
        out
    }

    fn cards(&self, cards: &[Card]) -> String {
        let mut out = String::new();
        for card in cards {
            out.push_str(&format!(
                "  {:<10} {:<12} {}\n",
                card.title,
                self.bold(&card.value),
                self.dim(&card.subtitle)
            ));
        }
        out.push('\n');
        out
    }

    pub fn notice(&self, notice: &Notice) -> String {
        let text = match notice.kind {
            NoticeKind::Info | NoticeKind::Empty => self.dim(&notice.text),
            NoticeKind::Success if self.color => notice.text.green().to_string(),
            NoticeKind::Error if self.color => notice.text.red().to_string(),
            NoticeKind::Success | NoticeKind::Error => notice.text.clone(),
        };
        format!("{text}\n")
    }

    /// Boxed table with a leading row-number column.
    pub fn table(&self, table: &Table) -> String {
        let mut headers = vec!["#".to_string()];
        headers.extend(table.columns.iter().cloned());

        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let marker = if table.selected == Some(i) { "*" } else { "" };
                let mut cells = vec![format!("{}{}", i + 1, marker)];
                cells.extend(
                    row.iter()
                        .map(|v| Self::truncate_value(&v.to_string(), self.max_column_width)),
                );
                cells
            })
            .collect();

        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| h.chars().count().min(self.max_column_width))
            .collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let mut out = String::new();
        out.push_str(&border(&widths, '┌', '┬', '┐'));
        out.push_str(&self.line(&headers, &widths, true));
        out.push_str(&border(&widths, '├', '┼', '┤'));
        for row in &rows {
            out.push_str(&self.line(row, &widths, false));
        }
        out.push_str(&border(&widths, '└', '┴', '┘'));
        out.push_str(&self.dim(&format!("({} rows)", rows.len())));
        out.push('\n');
        out
    }

    fn line(&self, cells: &[String], widths: &[usize], header: bool) -> String {
        let mut out = String::from("│");
        for (i, &width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let cell = Self::truncate_value(cell, width);
            let padded = format!(" {cell:<width$} ");
            if header {
                out.push_str(&self.bold(&padded));
            } else {
                out.push_str(&padded);
            }
            out.push('│');
        }
        out.push('\n');
        out
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (i, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        out.push(if i + 1 == widths.len() { right } else { mid });
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use srms_core::{ClearanceLevel, Role, SqlValue};

    fn plain() -> Renderer {
        Renderer::new(false, 12)
    }

    #[test]
    fn test_truncate_value() {
        assert_eq!(Renderer::truncate_value("short", 10), "short");
        assert_eq!(Renderer::truncate_value("abcdefghijkl", 8), "abcde...");
        assert_eq!(Renderer::truncate_value("abcdef", 2), "ab");
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new(
            vec!["ID".into(), "Name".into()],
            vec![
                vec![SqlValue::Int(1), "Ada Lovelace-Byron".into()],
                vec![SqlValue::Int(2), SqlValue::null_text()],
            ],
        );
        table.selected = Some(1);

        let out = plain().table(&table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "│ #  │ ID │ Name         │");
        assert_eq!(lines[3], "│ 1  │ 1  │ Ada Lovel... │");
        assert_eq!(lines[4], "│ 2* │ 2  │              │");
        assert_eq!(lines[6], "(2 rows)");
    }

    #[test]
    fn test_sidebar_marks_current() {
        let out = plain().sidebar(&[ViewId::Dashboard, ViewId::MyGrades], ViewId::MyGrades);
        assert_eq!(out, "   1. Dashboard\n>  2. My Grades\n");
    }

    #[test]
    fn test_header() {
        let session = Session::new(1, "admin1", Role::Admin, ClearanceLevel::TOP_SECRET);
        assert_eq!(
            plain().header(&session),
            "SRMS | admin1 (Admin) | Clearance: Level 4 - Top Secret"
        );
    }

    #[test]
    fn test_empty_notice_renders_text() {
        let mut panel = Panel::new();
        panel.heading("My Grades");
        panel.notice(NoticeKind::Empty, "No grades available");
        assert_eq!(plain().panel(&panel), "My Grades\n\nNo grades available\n");
    }
}
