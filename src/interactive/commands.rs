//! Command parsing for the terminal loop.

use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::{Result, TomodachiError};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Feed(Option<u32>),
    Play(Option<u32>),
    Sleep(Option<u32>),
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    New(Option<String>),
    Help,
    Quit,
}

/// (usage, description) for `help`
pub const COMMANDS: &[(&str, &str)] = &[
    ("status", "Show how your pet is doing"),
    ("feed [amount]", "Feed your pet"),
    ("play [minutes]", "Play with your pet"),
    ("sleep [hours]", "Let your pet sleep"),
    ("save [path]", "Save your pet to a file"),
    ("load [path]", "Load a pet from a file"),
    ("new [name]", "Adopt a new pet"),
    ("help", "Show this list"),
    ("quit", "Leave (also: exit)"),
];

impl Command {
    /// Parse a line. Blank input yields `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(None);
        };
        let cmd = head.to_lowercase();
        let rest: Vec<&str> = parts.collect();

        let command = match cmd.as_str() {
            "status" => Command::Status,
            "feed" => Command::Feed(number(&cmd, rest.first().copied())?),
            "play" => Command::Play(number(&cmd, rest.first().copied())?),
            "sleep" => Command::Sleep(number(&cmd, rest.first().copied())?),
            // paths may contain spaces
            "save" => Command::Save(joined(&rest).map(PathBuf::from)),
            "load" => Command::Load(joined(&rest).map(PathBuf::from)),
            "new" => Command::New(joined(&rest)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(TomodachiError::UnknownCommand(Arc::new(head.to_string()))),
        };

        Ok(Some(command))
    }
}

fn number(command: &str, arg: Option<&str>) -> Result<Option<u32>> {
    arg.map(|s| {
        s.parse::<u32>().map_err(|_| {
            TomodachiError::invalid_argument(
                command,
                format!("'{s}' is not a non-negative whole number"),
            )
        })
    })
    .transpose()
}

fn joined(rest: &[&str]) -> Option<String> {
    if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("status", Command::Status)]
    #[case("  FEED  ", Command::Feed(None))]
    #[case("feed 35", Command::Feed(Some(35)))]
    #[case("play 4", Command::Play(Some(4)))]
    #[case("sleep", Command::Sleep(None))]
    #[case("save", Command::Save(None))]
    #[case("save my pet.json", Command::Save(Some(PathBuf::from("my pet.json"))))]
    #[case("load /tmp/a.json", Command::Load(Some(PathBuf::from("/tmp/a.json"))))]
    #[case("new Mochi", Command::New(Some("Mochi".to_string())))]
    #[case("?", Command::Help)]
    #[case("exit", Command::Quit)]
    fn test_parse(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line).expect("parses"), Some(expected));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").expect("parses"), None);
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("dance now").expect_err("unknown");
        assert!(matches!(err, TomodachiError::UnknownCommand(_)));
    }

    #[rstest]
    #[case("feed lots")]
    #[case("play -3")]
    #[case("sleep 1.5")]
    fn test_bad_number(#[case] line: &str) {
        assert!(matches!(
            Command::parse(line),
            Err(TomodachiError::InvalidArgument { .. })
        ));
    }
}
