//! User intents typed at the dashboard prompt.

use shared::domain::{StudentField, StudentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    List,
    Show(StudentId),
    Add,
    Edit(StudentId),
    Set { field: StudentField, value: String },
    Save,
    Cancel,
    Delete(StudentId),
    Confirm,
    Dismiss,
    Help,
    Quit,
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::List => "list",
            UiCommand::Show(_) => "show",
            UiCommand::Add => "add",
            UiCommand::Edit(_) => "edit",
            UiCommand::Set { .. } => "set",
            UiCommand::Save => "save",
            UiCommand::Cancel => "cancel",
            UiCommand::Delete(_) => "delete",
            UiCommand::Confirm => "confirm",
            UiCommand::Dismiss => "dismiss",
            UiCommand::Help => "help",
            UiCommand::Quit => "quit",
        }
    }

    /// Commands that start or submit a change.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            UiCommand::Add
                | UiCommand::Edit(_)
                | UiCommand::Save
                | UiCommand::Delete(_)
                | UiCommand::Confirm
        )
    }

    /// Refused while a request is in flight: mutations plus anything that issues a request.
    pub fn waits_for_idle(&self) -> bool {
        self.is_mutating() || matches!(self, UiCommand::List | UiCommand::Show(_))
    }
}

pub const HELP: &str = "\
Commands:
  list                  reload the student directory
  show <id>             fetch one student from the server
  add                   open the add form
  edit <id>             open the edit form for a listed student
  set <field> <value>   fill a form field (name, nic, course, contact)
  save                  submit the open form
  cancel                close the form or the delete prompt
  delete <id>           ask to delete a student
  confirm               confirm the pending delete
  dismiss               hide the current alert
  help                  show this help
  quit                  leave the dashboard";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<UiCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" | "refresh" => UiCommand::List,
        "show" => UiCommand::Show(parse_id(rest)?),
        "add" | "new" => UiCommand::Add,
        "edit" => UiCommand::Edit(parse_id(rest)?),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            UiCommand::Set {
                field: field.parse()?,
                value: value.to_string(),
            }
        }
        "save" | "submit" => UiCommand::Save,
        "cancel" | "close" => UiCommand::Cancel,
        "delete" | "rm" => UiCommand::Delete(parse_id(rest)?),
        "confirm" | "yes" | "y" => UiCommand::Confirm,
        "dismiss" => UiCommand::Dismiss,
        "help" | "?" => UiCommand::Help,
        "quit" | "exit" | "q" => UiCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<StudentId, String> {
    if raw.is_empty() {
        return Err("a student id is required".to_string());
    }
    match raw.parse::<StudentId>() {
        Ok(id) if id.0 > 0 => Ok(id),
        _ => Err(format!("`{raw}` is not a valid student id")),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
