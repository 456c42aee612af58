//! `srms run`: the interactive console.
//!
//! Each pass of the outer loop opens a fresh connection and shows the login
//! prompt. A successful login hands the connection to a [`Navigator`];
//! logging out closes it and returns to the login prompt.

use anyhow::Result;
use tracing::{info, warn};

use srms_core::SrmsConfig;
use srms_gateway::contract::Decision;
use srms_gateway::{PostgresGateway, ProcedureGateway};
use srms_shell::{login, Action, FormId, LoginError, Navigator, ShellError};

use crate::console::Console;

const HELP: &str = "\
Commands:
  <n>              open view n from the menu
  select <row>     select a table row (s)
  approve [note]   approve the selected role request (a)
  deny [note]      deny the selected role request (d)
  add              add a user, on the Users view
  form             fill in the form on the current view (f)
  refresh          reload the current view (r)
  logout           end the session
  quit             log out and exit (q)";

/// A parsed line typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Open(usize),
    Select(usize),
    Decide(Decision, Option<String>),
    AddUser,
    Form,
    Refresh,
    Help,
    Logout,
    Quit,
    Nothing,
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let note = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word.to_ascii_lowercase().as_str() {
            "" => ShellCommand::Nothing,
            "s" | "select" => ShellCommand::Select(parse_index(rest)?),
            "a" | "approve" => ShellCommand::Decide(Decision::Approve, note),
            "d" | "deny" => ShellCommand::Decide(Decision::Deny, note),
            "add" => ShellCommand::AddUser,
            "f" | "form" => ShellCommand::Form,
            "r" | "refresh" => ShellCommand::Refresh,
            "h" | "help" | "?" => ShellCommand::Help,
            "logout" => ShellCommand::Logout,
            "q" | "quit" | "exit" => ShellCommand::Quit,
            other => match other.parse::<usize>() {
                Ok(n) => ShellCommand::Open(n),
                Err(_) => return Err(format!("Unknown command '{other}'. Type help.")),
            },
        };
        Ok(command)
    }
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| "Expected a row number".to_string())
}

/// How a session ended.
enum Exit {
    Logout,
    Halted,
    Quit,
}

pub async fn run(config: SrmsConfig) -> Result<()> {
    let mut console = Console::new(&config.shell)?;
    console.banner();

    loop {
        let gateway = match PostgresGateway::connect(&config.upstream).await {
            Ok(gateway) => gateway,
            Err(e) => {
                console.error(&format!("Connection Error: {e}"));
                console.save_history();
                return Err(e.into());
            }
        };

        let Some(navigator) = login_prompt(&mut console, gateway).await? else {
            break;
        };

        match session(&mut console, navigator).await? {
            Exit::Logout | Exit::Halted => continue,
            Exit::Quit => break,
        }
    }

    console.save_history();
    Ok(())
}

/// Ask for credentials until a login succeeds. `None` when input ends.
async fn login_prompt(
    console: &mut Console,
    mut gateway: PostgresGateway,
) -> Result<Option<Navigator<PostgresGateway>>> {
    loop {
        let Some(username) = console.read_line("Username: ")? else {
            gateway.close().await?;
            return Ok(None);
        };
        if let Err(e) = require_username(&username) {
            console.error(&e.to_string());
            continue;
        }
        let password = console.read_password("Password: ")?;

        match login(&mut gateway, &username, &password).await {
            Ok(session) => {
                let navigator = Navigator::start(session, gateway).await?;
                return Ok(Some(navigator));
            }
            Err(e) if e.is_connectivity() => {
                console.error(&format!("Connection Error: {e}"));
                return Err(e.into());
            }
            Err(e @ LoginError::Malformed(_)) => {
                warn!(error = %e, "Unusable login response");
                console.error(&e.to_string());
            }
            Err(e) => console.error(&e.to_string()),
        }
    }
}

/// A blank username (or Ctrl+C) is refused before the password prompt.
fn require_username(line: &str) -> Result<(), LoginError> {
    if line.trim().is_empty() {
        return Err(LoginError::MissingCredentials);
    }
    Ok(())
}

async fn session(
    console: &mut Console,
    mut navigator: Navigator<PostgresGateway>,
) -> Result<Exit> {
    console.show(&navigator);
    console.hint("Type help for commands.");

    loop {
        let Some(line) = console.read_line("srms> ")? else {
            navigator.logout().await?;
            return Ok(Exit::Quit);
        };

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                console.error(&message);
                continue;
            }
        };

        let outcome = match command {
            ShellCommand::Nothing => continue,
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Logout => {
                if console.confirm("Logout?")? {
                    navigator.logout().await?;
                    return Ok(Exit::Logout);
                }
                continue;
            }
            ShellCommand::Quit => {
                navigator.logout().await?;
                return Ok(Exit::Quit);
            }
            ShellCommand::Open(n) => match navigator.views().get(n.wrapping_sub(1)) {
                Some(view) => navigator.render(*view).await.map(|()| None),
                None => Err(ShellError::validation(format!("No menu entry {n}"))),
            },
            ShellCommand::Refresh => {
                let view = navigator.current_view();
                navigator.render(view).await.map(|()| None)
            }
            ShellCommand::Select(row) => navigator.select(row - 1).map(|()| None),
            ShellCommand::Decide(decision, note) => {
                navigator.decide(decision, note).await.map(Some)
            }
            ShellCommand::AddUser => {
                if navigator.panel().actions().contains(&Action::AddUser) {
                    submit_form(console, &mut navigator, FormId::NewUser).await?
                } else {
                    Err(ShellError::validation("Open the Users view to add a user"))
                }
            }
            ShellCommand::Form => match navigator.panel().form().map(|f| f.id) {
                Some(form) => submit_form(console, &mut navigator, form).await?,
                None => Err(ShellError::validation("This view has no form")),
            },
        };

        match outcome {
            Ok(message) => {
                console.show(&navigator);
                if let Some(message) = message {
                    console.success(&message);
                }
            }
            Err(e) if e.is_fatal() => {
                console.error(&e.to_string());
                info!(user_id = navigator.session().user_id(), "Session halted");
                if let Err(close) = navigator.logout().await {
                    warn!(error = %close, "Closing a lost connection failed");
                }
                return Ok(Exit::Halted);
            }
            Err(e) => {
                console.show(&navigator);
                console.error(&e.to_string());
            }
        }
    }
}

/// Prompt for `form` and submit it. Input ending midway cancels quietly.
async fn submit_form(
    console: &mut Console,
    navigator: &mut Navigator<PostgresGateway>,
    form: FormId,
) -> Result<Result<Option<String>, ShellError>> {
    let spec = form.spec(navigator.session().role());
    let Some(mut values) = console.prompt_form(&spec)? else {
        return Ok(Ok(None));
    };
    Ok(navigator.submit(form, &mut values).await.map(Some))
}
