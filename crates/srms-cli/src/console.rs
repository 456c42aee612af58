//! Terminal input and output for the interactive shell.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

use srms_core::ShellConfig;
use srms_gateway::PostgresGateway;
use srms_shell::{FieldKind, FieldSpec, FormSpec, FormValues, Navigator, Renderer};

/// Line editor plus renderer.
pub struct Console {
    editor: DefaultEditor,
    renderer: Renderer,
    history_file: Option<PathBuf>,
}

impl Console {
    pub fn new(config: &ShellConfig) -> Result<Self> {
        if !config.color {
            colored::control::set_override(false);
        }

        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &config.history_file
            && let Err(e) = editor.load_history(path)
        {
            debug!(path = %path.display(), error = %e, "No history loaded");
        }

        Ok(Self {
            editor,
            renderer: Renderer::from_config(config),
            history_file: config.history_file.clone(),
        })
    }

    /// Read one line. `None` on end of input; Ctrl+C yields an empty line.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                self.remember(&line);
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Add a non-blank line to the history.
    fn remember(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!(error = %e, "History entry not added");
        }
    }

    /// Read a secret without echo. Never added to history.
    pub fn read_password(&self, prompt: &str) -> Result<String> {
        Ok(rpassword::prompt_password(prompt)?)
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N] "))?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes")
        ))
    }

    /// Prompt for every field of `form`. `None` if input ended midway.
    pub fn prompt_form(&mut self, form: &FormSpec) -> Result<Option<FormValues>> {
        println!("{}", form.title.bold());
        let mut values = FormValues::new();
        for field in &form.fields {
            let Some(value) = self.prompt_field(field)? else {
                return Ok(None);
            };
            values.set(field.name, value);
        }
        Ok(Some(values))
    }

    fn prompt_field(&mut self, field: &FieldSpec) -> Result<Option<String>> {
        let label = if field.required {
            format!("{}: ", field.label)
        } else {
            format!("{} (optional): ", field.label)
        };

        match &field.kind {
            FieldKind::Secret => self.read_password(&label).map(Some),
            FieldKind::Choice(options) => {
                for (i, option) in options.iter().enumerate() {
                    println!("  {}. {option}", i + 1);
                }
                let Some(answer) = self.read_line(&label)? else {
                    return Ok(None);
                };
                Ok(Some(resolve_choice(options, answer.trim())))
            }
            FieldKind::Text | FieldKind::Integer | FieldKind::Number | FieldKind::LongText => {
                self.read_line(&label)
            }
        }
    }

    pub fn banner(&self) {
        println!("{}", "SRMS".bold());
        println!("{}", "Secure Student Records Management System".dimmed());
        println!();
    }

    /// Header, sidebar and the current panel.
    pub fn show(&self, navigator: &Navigator<PostgresGateway>) {
        println!();
        println!("{}", self.renderer.header(navigator.session()));
        println!();
        print!(
            "{}",
            self.renderer
                .sidebar(navigator.views(), navigator.current_view())
        );
        println!();
        print!("{}", self.renderer.panel(navigator.panel()));
    }

    pub fn success(&self, message: &str) {
        println!("{}", format!("✓ {message}").green());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", format!("✗ {message}").red());
    }

    pub fn hint(&self, message: &str) {
        println!("{}", message.dimmed());
    }

    pub fn save_history(&mut self) {
        if let Some(path) = &self.history_file
            && let Err(e) = self.editor.save_history(path)
        {
            debug!(path = %path.display(), error = %e, "History not saved");
        }
    }
}

/// Accept an option by its 1-based number or its name (case-insensitive).
/// Anything else is passed through for the form parser to reject.
fn resolve_choice(options: &[String], answer: &str) -> String {
    if let Ok(n) = answer.parse::<usize>()
        && let Some(option) = n.checked_sub(1).and_then(|i| options.get(i))
    {
        return option.clone();
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .cloned()
        .unwrap_or_else(|| answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::History;

    #[test]
    fn test_resolve_choice() {
        let options = vec!["TA".to_string(), "Instructor".to_string()];
        assert_eq!(resolve_choice(&options, "2"), "Instructor");
        assert_eq!(resolve_choice(&options, "ta"), "TA");
        assert_eq!(resolve_choice(&options, "0"), "0");
        assert_eq!(resolve_choice(&options, "Admin"), "Admin");
    }

    #[test]
    fn test_blank_lines_stay_out_of_history() {
        let mut console = Console::new(&ShellConfig::default()).unwrap();
        console.remember("3");
        console.remember("   ");
        console.remember("");
        assert_eq!(console.editor.history().len(), 1);
    }
}
