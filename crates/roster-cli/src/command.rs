//! Parsing of shell input lines.

use roster_core::{ContactEvent, ContactId, SortType};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  first <text>          set the draft first name
  last <text>           set the draft last name
  phone <text>          set the draft phone number
  show | hide           open or close the add-contact dialog
  save                  save the draft (all three fields must be filled in)
  sort <first|last|phone>
  delete <id>           delete a saved contact
  list                  print the current screen
  json                  print the current screen as JSON
  help | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Event(ContactEvent),
  /// Resolved against the visible list before it becomes an event.
  Delete(ContactId),
  List,
  Json,
  Help,
  Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
  #[error("unknown command {0:?} (try `help`)")]
  Unknown(String),

  #[error("`{0}` needs an argument")]
  MissingArgument(&'static str),

  #[error("not a contact id: {0:?}")]
  InvalidId(String),

  #[error("{0}")]
  Sort(String),
}

impl Command {
  /// Parse a line. Blank lines reprint the screen.
  pub fn parse(line: &str) -> Result<Self, ParseError> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim_end_matches(['\r', '\n'])),
      None => (line.trim_end(), ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
      "" | "list" | "ls" => Command::List,
      "first" => Command::Event(ContactEvent::SetFirstName(rest.to_owned())),
      "last" => Command::Event(ContactEvent::SetLastName(rest.to_owned())),
      "phone" => Command::Event(ContactEvent::SetPhoneNumber(rest.to_owned())),
      "show" | "add" => Command::Event(ContactEvent::ShowDialog),
      "hide" | "cancel" => Command::Event(ContactEvent::HideDialog),
      "save" => Command::Event(ContactEvent::SaveContact),
      "sort" => {
        let arg = required(rest, "sort")?;
        let sort_type = arg
          .parse::<SortType>()
          .map_err(|e| ParseError::Sort(e.to_string()))?;
        Command::Event(ContactEvent::SortContact(sort_type))
      }
      "delete" | "rm" => {
        let arg = required(rest, "delete")?;
        let id = arg
          .parse::<i64>()
          .map_err(|_| ParseError::InvalidId(arg.to_owned()))?;
        Command::Delete(ContactId(id))
      }
      "json" => Command::Json,
      "help" | "?" => Command::Help,
      "quit" | "exit" | "q" => Command::Quit,
      other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(command)
  }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, ParseError> {
  let arg = rest.trim();
  if arg.is_empty() {
    return Err(ParseError::MissingArgument(command));
  }
  Ok(arg)
}
