//! Parsing of REPL lines into commands.

pub const HELP: &str = "\
commands:
  list               show the list again
  add <text>         create a todo
  draft <text>       set the entry draft without submitting
  submit             create a todo from the draft
  edit <n>           start editing row n
  text <text>        replace the edit draft
  save               commit the edit
  toggle <n>         flip completion of row n
  rm <n>             delete row n
  refresh            re-fetch from the backend
  help               this text
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    List,
    Add(String),
    Draft(String),
    Submit,
    Edit(usize),
    Text(String),
    Save,
    Toggle(usize),
    Remove(usize),
    Refresh,
    Help,
    Quit,
}

/// Parses one line. Row numbers are 1-based as displayed; the returned
/// index is 0-based.
pub fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" | "list" | "ls" => Ok(Input::List),
        "add" => non_empty(rest, "add").map(Input::Add),
        "draft" => Ok(Input::Draft(rest.to_string())),
        "submit" => Ok(Input::Submit),
        "edit" => row(rest).map(Input::Edit),
        "text" => Ok(Input::Text(rest.to_string())),
        "save" => Ok(Input::Save),
        "toggle" | "done" => row(rest).map(Input::Toggle),
        "rm" | "delete" => row(rest).map(Input::Remove),
        "refresh" => Ok(Input::Refresh),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        other => Err(format!("unknown command `{other}`; try `help`")),
    }
}

fn non_empty(text: &str, command: &str) -> Result<String, String> {
    if text.is_empty() {
        Err(format!("`{command}` needs some text"))
    } else {
        Ok(text.to_string())
    }
}

fn row(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a row number, got `{arg}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_commands() {
        assert_eq!(parse("add Buy milk").unwrap(), Input::Add("Buy milk".into()));
        assert_eq!(parse("  text   oat milk ").unwrap(), Input::Text("oat milk".into()));
        assert_eq!(parse("draft").unwrap(), Input::Draft(String::new()));
    }

    #[test]
    fn row_numbers_are_one_based() {
        assert_eq!(parse("edit 1").unwrap(), Input::Edit(0));
        assert_eq!(parse("toggle 3").unwrap(), Input::Toggle(2));
        assert_eq!(parse("rm 2").unwrap(), Input::Remove(1));
        assert!(parse("rm 0").is_err());
        assert!(parse("edit x").is_err());
    }

    #[test]
    fn empty_line_lists() {
        assert_eq!(parse("").unwrap(), Input::List);
        assert_eq!(parse("   ").unwrap(), Input::List);
    }

    #[test]
    fn add_requires_text() {
        assert!(parse("add").is_err());
        assert!(parse("add   ").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse("frobnicate").unwrap_err().contains("frobnicate"));
    }
}
