//! Line-oriented terminal front-end.
//!
//! Typed commands become [`DashboardEvent`]s; each transition redraws the
//! whole frame on the output.

use std::io::Write;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::dashboard::{DashboardEvent, DashboardState, Frontend};
use crate::application::error::AppError;
use crate::domain::draft::DraftField;
use crate::domain::products::ProductId;
use crate::infra::error::InfraError;

use super::views::DashboardView;
use super::views::dialogs::HelpLineView;

const TARGET: &str = "presentation::terminal";

pub const COMMANDS: &[HelpLineView] = &[
    HelpLineView {
        usage: "search <text>",
        summary: "filter by text (applies after a short pause)",
    },
    HelpLineView {
        usage: "category <name|all>",
        summary: "filter by category; clears the search",
    },
    HelpLineView {
        usage: "page <n>",
        summary: "jump to page n",
    },
    HelpLineView {
        usage: "next | prev",
        summary: "move one page",
    },
    HelpLineView {
        usage: "add",
        summary: "open the add form",
    },
    HelpLineView {
        usage: "edit <id>",
        summary: "open the edit form for a row on this page",
    },
    HelpLineView {
        usage: "set <field> <value>",
        summary: "fill a form field (title, price, stock, category, description)",
    },
    HelpLineView {
        usage: "submit | cancel",
        summary: "save or close the form",
    },
    HelpLineView {
        usage: "delete <id>",
        summary: "ask to delete a product",
    },
    HelpLineView {
        usage: "confirm",
        summary: "confirm the pending delete",
    },
    HelpLineView {
        usage: "dismiss",
        summary: "close the notice",
    },
    HelpLineView {
        usage: "retry",
        summary: "reload after an error",
    },
    HelpLineView {
        usage: "menu",
        summary: "toggle the sidebar",
    },
    HelpLineView {
        usage: "help",
        summary: "toggle this list",
    },
    HelpLineView {
        usage: "quit",
        summary: "leave the dashboard",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{value}` is not a valid {expected}")]
    InvalidArgument {
        value: String,
        expected: &'static str,
    },
}

/// Parse one typed line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<DashboardEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word.to_ascii_lowercase().as_str() {
        "search" => DashboardEvent::SearchChanged(rest.to_string()),
        "category" => {
            let name = require(rest, "category", "a category name")?;
            DashboardEvent::CategorySelected(name.to_string())
        }
        "page" => {
            let page = require(rest, "page", "a page number")?;
            DashboardEvent::PageSelected(parse_number(page, "page number")?)
        }
        "next" => DashboardEvent::NextPage,
        "prev" | "previous" => DashboardEvent::PreviousPage,
        "add" => DashboardEvent::OpenAdd,
        "edit" => {
            DashboardEvent::EditRequested(parse_id(require(rest, "edit", "a product id")?)?)
        }
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            let field = require(field, "set", "a field name and a value")?;
            let field = field.parse::<DraftField>().map_err(|_| CommandError::InvalidArgument {
                value: field.to_string(),
                expected: "field (title, price, stock, category, description)",
            })?;
            DashboardEvent::FieldChanged(field, value.to_string())
        }
        "submit" | "save" => DashboardEvent::Submit,
        "cancel" | "close" => DashboardEvent::CloseForm,
        "delete" => {
            DashboardEvent::DeleteRequested(parse_id(require(rest, "delete", "a product id")?)?)
        }
        "confirm" | "yes" => DashboardEvent::ConfirmDelete,
        "no" | "keep" => DashboardEvent::CancelDelete,
        "dismiss" | "ok" => DashboardEvent::DismissNotice,
        "retry" => DashboardEvent::Retry,
        "menu" => DashboardEvent::ToggleSidebar,
        "help" | "?" => DashboardEvent::ToggleHelp,
        "quit" | "exit" | "q" => DashboardEvent::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Some(event))
}

fn require<'a>(
    value: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(value)
    }
}

fn parse_number(value: &str, expected: &'static str) -> Result<u32, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        value: value.to_string(),
        expected,
    })
}

fn parse_id(value: &str) -> Result<ProductId, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        value: value.to_string(),
        expected: "product id",
    })
}

/// Forward parsed lines from `input` until EOF, `quit`, or the runtime goes away.
///
/// Unparseable lines, including ones that are not valid UTF-8, are reported on
/// `errors` and skipped.
pub async fn forward_commands<R, W>(
    mut input: R,
    intents: mpsc::Sender<DashboardEvent>,
    mut errors: W,
) -> Result<(), InfraError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            warn!(target: TARGET, bytes = buf.len(), "input line is not valid UTF-8");
            writeln!(errors, "ignored a line that is not valid UTF-8")?;
            continue;
        };
        match parse_command(line) {
            Ok(Some(event)) => {
                let quit = event == DashboardEvent::Quit;
                if intents.send(event).await.is_err() {
                    debug!(target: TARGET, "dashboard closed; stop reading input");
                    break;
                }
                if quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(target: TARGET, error = %err, "rejected command");
                writeln!(errors, "{err}")?;
            }
        }
    }
    Ok(())
}

/// Writes a fresh frame after every transition.
pub struct TerminalFrontend<W> {
    out: W,
    last_frame: Option<String>,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_frame: None,
        }
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Frontend for TerminalFrontend<W> {
    fn frame(&mut self, state: &DashboardState) -> Result<(), AppError> {
        let frame = DashboardView::derive(state, COMMANDS).render()?;
        if self.last_frame.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }

        writeln!(self.out, "\n{frame}\n> ").map_err(InfraError::from)?;
        self.out.flush().map_err(InfraError::from)?;
        self.last_frame = Some(frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(
            parse_command("page 4"),
            Ok(Some(DashboardEvent::PageSelected(4)))
        );
        assert_eq!(parse_command("  next "), Ok(Some(DashboardEvent::NextPage)));
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn search_keeps_inner_spaces_and_allows_empty() {
        assert_eq!(
            parse_command("search red lipstick"),
            Ok(Some(DashboardEvent::SearchChanged("red lipstick".to_string())))
        );
        assert_eq!(
            parse_command("search"),
            Ok(Some(DashboardEvent::SearchChanged(String::new())))
        );
    }

    #[test]
    fn set_parses_field_and_value() {
        assert_eq!(
            parse_command("set Price 12.50"),
            Ok(Some(DashboardEvent::FieldChanged(
                DraftField::Price,
                "12.50".to_string()
            )))
        );
        assert!(matches!(
            parse_command("set colour red"),
            Err(CommandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(
            parse_command("delete 7"),
            Ok(Some(DashboardEvent::DeleteRequested(ProductId::new(7))))
        );
        assert!(matches!(
            parse_command("edit seven"),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_command("edit"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(
            parse_command("launch"),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }

    #[tokio::test]
    async fn forwarding_stops_at_quit() {
        let input: &[u8] = b"next\nbogus\nquit\nprev\n";
        let (tx, mut rx) = mpsc::channel(8);
        let mut errors = Vec::new();

        forward_commands(input, tx, &mut errors)
            .await
            .expect("forward");

        assert_eq!(rx.recv().await, Some(DashboardEvent::NextPage));
        assert_eq!(rx.recv().await, Some(DashboardEvent::Quit));
        assert_eq!(rx.recv().await, None);
        assert!(String::from_utf8(errors).expect("utf8").contains("bogus"));
    }

    #[tokio::test]
    async fn undecodable_line_is_skipped_and_reading_continues() {
        let input: &[u8] = b"search pen\n\xff\xfe\nquit\n";
        let (tx, mut rx) = mpsc::channel(8);
        let mut errors = Vec::new();

        forward_commands(input, tx, &mut errors)
            .await
            .expect("forward");

        assert_eq!(
            rx.recv().await,
            Some(DashboardEvent::SearchChanged("pen".to_string()))
        );
        assert_eq!(rx.recv().await, Some(DashboardEvent::Quit));
        assert_eq!(rx.recv().await, None);
        assert!(
            String::from_utf8(errors)
                .expect("utf8")
                .contains("not valid UTF-8")
        );
    }

    #[tokio::test]
    async fn last_line_without_newline_is_forwarded() {
        let input: &[u8] = b"\xff\nnext";
        let (tx, mut rx) = mpsc::channel(8);

        forward_commands(input, tx, Vec::new())
            .await
            .expect("forward");

        assert_eq!(rx.recv().await, Some(DashboardEvent::NextPage));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn identical_frames_are_written_once() {
        let mut frontend = TerminalFrontend::new(Vec::new());
        let state = DashboardState::new();

        frontend.frame(&state).expect("first frame");
        frontend.frame(&state).expect("second frame");

        let written = String::from_utf8(frontend.into_inner()).expect("utf8");
        assert_eq!(written.matches("Product Management").count(), 1);
    }
}
