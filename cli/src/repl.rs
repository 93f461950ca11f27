//! Prompt-driven command loop and the line-oriented batch mode.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use shopgraph_sdk::{Command, CommandName, Outcome, Session, SessionError};
use tracing::{debug, warn};

use crate::render::{render_error, render_outcome, OutputFormat};

const COMMAND_PROMPT: &str =
    "Enter command (register, login, add_product, browse, purchase, recommend, suggest, exit): ";

/// Whitespace-separated tokens spanning input lines.
struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let Some(line) = read_lossy_line(&mut self.input)? else {
                return Ok(None);
            };
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

/// Next input line with invalid UTF-8 replaced by U+FFFD; `None` at end of input.
fn read_lossy_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Why a field could not be read.
enum FieldRead {
    Eof,
    NotANumber(String),
}

pub struct Repl<R, W> {
    tokens: TokenReader<R>,
    out: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, out: W, format: OutputFormat) -> Self {
        Self {
            tokens: TokenReader::new(input),
            out,
            format,
        }
    }

    /// Prompt for commands until `exit` or end of input.
    pub fn run(&mut self, session: &mut Session) -> Result<()> {
        loop {
            let Some(word) = self.prompt(COMMAND_PROMPT)? else {
                break;
            };
            let name = match word.parse::<CommandName>() {
                Ok(name) => name,
                Err(err) => {
                    debug!(command = %word, "unrecognized command");
                    self.report_input_error("Invalid command.".to_string(), err)?;
                    continue;
                }
            };

            let command = match self.read_fields(name)? {
                Ok(command) => command,
                Err(FieldRead::Eof) => break,
                Err(FieldRead::NotANumber(token)) => {
                    let err = SessionError::InvalidPayload(format!("not a number: {}", token));
                    self.report_input_error(format!("Invalid number: {}", token), err)?;
                    continue;
                }
            };

            if self.dispatch(session, command)? {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn read_fields(&mut self, name: CommandName) -> Result<std::result::Result<Command, FieldRead>> {
        let command = match name {
            CommandName::Register => {
                let Some(username) = self.prompt("Enter username: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                let Some(email) = self.prompt("Enter email: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                let Some(password) = self.prompt("Enter password: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                Command::Register {
                    username,
                    email,
                    password,
                }
            }
            CommandName::Login => {
                let Some(username) = self.prompt("Enter username: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                let Some(password) = self.prompt("Enter password: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                Command::Login { username, password }
            }
            CommandName::AddProduct => {
                let Some(product_id) = self.prompt("Enter product ID: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                let Some(name) = self.prompt("Enter product name: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                let Some(category) = self.prompt("Enter product category: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                let inventory = match self.prompt_number("Enter product inventory: ")? {
                    Ok(n) => n,
                    Err(e) => return Ok(Err(e)),
                };
                Command::AddProduct {
                    product_id,
                    name,
                    category,
                    inventory,
                }
            }
            CommandName::Browse | CommandName::Purchase => {
                let user_index = match self.prompt_number("Enter user index: ")? {
                    Ok(n) => n,
                    Err(e) => return Ok(Err(e)),
                };
                let prompt = if name == CommandName::Browse {
                    "Enter product ID to browse: "
                } else {
                    "Enter product ID to purchase: "
                };
                let Some(product_id) = self.prompt(prompt)? else {
                    return Ok(Err(FieldRead::Eof));
                };
                if name == CommandName::Browse {
                    Command::Browse {
                        user_index,
                        product_id,
                    }
                } else {
                    Command::Purchase {
                        user_index,
                        product_id,
                    }
                }
            }
            CommandName::Recommend => {
                let user_index = match self.prompt_number("Enter user index: ")? {
                    Ok(n) => n,
                    Err(e) => return Ok(Err(e)),
                };
                Command::Recommend { user_index }
            }
            CommandName::Suggest => {
                let Some(query) = self.prompt("Enter product name query: ")? else {
                    return Ok(Err(FieldRead::Eof));
                };
                Command::Suggest { query }
            }
            CommandName::Exit => Command::Exit,
        };
        Ok(Ok(command))
    }

    /// Execute and print. Returns `true` when the loop should stop.
    fn dispatch(&mut self, session: &mut Session, command: Command) -> Result<bool> {
        match session.execute(command) {
            Ok(Outcome::Exit) => Ok(true),
            Ok(outcome) => {
                writeln!(self.out, "{}", render_outcome(&outcome, self.format)?)?;
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "command failed");
                writeln!(self.out, "{}", render_error(&err, self.format))?;
                Ok(false)
            }
        }
    }

    /// Text mode keeps the terse interactive message; JSON mode emits an error object.
    fn report_input_error(&mut self, text: String, err: SessionError) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", text),
            OutputFormat::Json => writeln!(self.out, "{}", render_error(&err, self.format)),
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        if self.format == OutputFormat::Text {
            write!(self.out, "{}", text)?;
            self.out.flush()?;
        }
        self.tokens.next_token()
    }

    fn prompt_number<T: std::str::FromStr>(
        &mut self,
        text: &str,
    ) -> io::Result<std::result::Result<T, FieldRead>> {
        Ok(match self.prompt(text)? {
            None => Err(FieldRead::Eof),
            Some(token) => token.parse().map_err(|_| FieldRead::NotANumber(token)),
        })
    }
}

/// One JSON command per non-empty line; one rendered result per line.
pub fn run_batch<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut out: W,
    format: OutputFormat,
) -> Result<()> {
    while let Some(line) = read_lossy_line(&mut input)? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let result = Command::parse_json(trimmed).and_then(|command| session.execute(command));
        match result {
            Ok(Outcome::Exit) => break,
            Ok(outcome) => writeln!(out, "{}", render_outcome(&outcome, format)?)?,
            Err(err) => {
                warn!(error = %err, "batch command failed");
                writeln!(out, "{}", render_error(&err, format))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
