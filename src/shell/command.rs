use std::str::FromStr;

use crate::models::{MediaField, MediaId};

/// One line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// Manual stand-in for the last row scrolling into view
    More,
    Down,
    Up,
    Add,
    Edit(MediaId),
    Delete(MediaId),
    Set(MediaField, String),
    Show,
    Save,
    Cancel,
    Confirm,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list                 show the loaded entries
  more                 load the next page
  down | up            scroll the table
  add                  open an empty form
  edit <id>            open the form for a loaded entry
  delete <id>          ask to delete an entry
  confirm | cancel     answer a delete prompt (cancel also closes the form)
  set <field> <value>  fill a form field (title, type, director, budget,
                       location, duration, year)
  show                 print the form
  save                 submit the form
  help                 this text
  quit                 leave";

fn parse_id(arg: Option<&str>, usage: &str) -> Result<MediaId, String> {
    let arg = arg.ok_or_else(|| format!("usage: {}", usage))?;
    arg.parse::<MediaId>()
        .map_err(|_| format!("'{}' is not an id", arg))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = Some(rest).filter(|rest| !rest.is_empty());

        match word.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "more" => Ok(Command::More),
            "down" | "j" => Ok(Command::Down),
            "up" | "k" => Ok(Command::Up),
            "add" | "new" => Ok(Command::Add),
            "edit" => parse_id(arg, "edit <id>").map(Command::Edit),
            "delete" | "rm" => parse_id(arg, "delete <id>").map(Command::Delete),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(field, value)| (field, value.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                Ok(Command::Set(field.parse()?, value.to_string()))
            }
            "show" => Ok(Command::Show),
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "confirm" | "yes" => Ok(Command::Confirm),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}
