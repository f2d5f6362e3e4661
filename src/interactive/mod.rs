//! Interactive front ends
//!
//! - the line-oriented command loop in this module, which reads from any
//!   `BufRead` and writes to any `Write` (stdin/stdout in the binary)
//! - [`tui`], a full-screen terminal window with key bindings and gauges
//!
//! Both only call [`Keeper`] methods and render what comes back.

pub mod commands;
pub mod tui;

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::errors::TomodachiError;
use crate::pet::Outcome;
use crate::state::Keeper;

pub use self::commands::{Command, COMMANDS};

const BANNER: &str =
    "Welcome to Tomodachi! Type 'status' to see your pet, 'help' for commands, 'quit' to exit.";
const PROMPT: &str = "> ";

/// What a single line produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub quit: bool,
    pub message: String,
}

impl Reply {
    fn say(message: impl Into<String>) -> Self {
        Self {
            quit: false,
            message: message.into(),
        }
    }
}

/// Run the command loop until `quit` or end of input
pub fn run<C, R, W>(keeper: &mut Keeper<C>, input: R, mut output: W) -> io::Result<()>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{BANNER}")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            debug!("End of input, leaving command loop");
            break;
        };
        let line = line?;

        let reply = handle_line(keeper, &line);
        if !reply.message.is_empty() {
            writeln!(output, "{}", reply.message)?;
        }
        if reply.quit {
            break;
        }
    }

    Ok(())
}

/// Handle one line of input
///
/// Errors are turned into messages; the loop never stops because of one.
pub fn handle_line<C: Clock>(keeper: &mut Keeper<C>, line: &str) -> Reply {
    match Command::parse(line) {
        Ok(Some(command)) => execute(keeper, command),
        Ok(None) => Reply::say(""),
        Err(e) => {
            debug!("Rejected input {:?}: {}", line, e);
            Reply::say(e.to_string())
        }
    }
}

/// Execute a parsed command
pub fn execute<C: Clock>(keeper: &mut Keeper<C>, command: Command) -> Reply {
    let name = keeper.pet().name().to_string();

    let message = match command {
        Command::Status => return Reply::say(keeper.status().to_string()),
        Command::Help => return Reply::say(help_text()),
        Command::Quit => {
            return Reply {
                quit: true,
                message: "Goodbye!".to_string(),
            }
        }
        Command::Feed(amount) => match keeper.feed(amount) {
            Outcome::Deceased => deceased(&name),
            _ => format!("You fed {name}."),
        },
        Command::Play(minutes) => match keeper.play(minutes) {
            Outcome::Done => format!("You played with {name}."),
            Outcome::Exhausted => format!("{name} is too tired to enjoy playing."),
            Outcome::Deceased => deceased(&name),
        },
        Command::Sleep(hours) => {
            let hours = hours.unwrap_or(keeper.rules().sleep_hours);
            match keeper.sleep(Some(hours)) {
                Outcome::Deceased => deceased(&name),
                _ => format!("{name} slept for {hours} hours."),
            }
        }
        Command::Save(path) => match keeper.save(path.as_deref()) {
            Ok(path) => format!("Saved to {}", path.display()),
            Err(e) => failure("Failed to save", &e),
        },
        Command::Load(path) => match keeper.load(path.as_deref()) {
            Ok(path) => format!("Loaded from {}", path.display()),
            Err(e) => failure("Failed to load", &e),
        },
        Command::New(new_name) => {
            let pet = keeper.adopt(new_name.as_deref());
            format!("Say hello to {}!", pet.name())
        }
    };

    Reply::say(format!("{message}\n{}", keeper.status()))
}

fn deceased(name: &str) -> String {
    format!("{name} is no longer alive.")
}

fn failure(prefix: &str, err: &TomodachiError) -> String {
    warn!("{}: {}", prefix, err);
    match err.hint() {
        Some(hint) => format!("{prefix}: {err}\n{hint}"),
        None => format!("{prefix}: {err}"),
    }
}

fn help_text() -> String {
    let width = COMMANDS.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    COMMANDS
        .iter()
        .map(|(usage, desc)| format!("  {usage:<width$}  {desc}"))
        .collect::<Vec<_>>()
        .join("\n")
}
