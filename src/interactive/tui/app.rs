//! Window state and event loop.

use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use super::terminal::Tui;
use super::ui;
use crate::clock::Clock;
use crate::interactive::{execute, Command};
use crate::pet::{Mood, PetSnapshot};
use crate::state::Keeper;

/// A button in the window, bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Feed,
    Play,
    Sleep,
    Save,
    Load,
    Quit,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Feed,
        Button::Play,
        Button::Sleep,
        Button::Save,
        Button::Load,
        Button::Quit,
    ];

    pub fn key(self) -> char {
        match self {
            Button::Feed => 'f',
            Button::Play => 'p',
            Button::Sleep => 's',
            Button::Save => 'w',
            Button::Load => 'l',
            Button::Quit => 'q',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Button::Feed => "Feed",
            Button::Play => "Play",
            Button::Sleep => "Sleep",
            Button::Save => "Save",
            Button::Load => "Load",
            Button::Quit => "Quit",
        }
    }

    fn from_key(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.key() == c.to_ascii_lowercase())
    }

    fn command(self) -> Command {
        match self {
            Button::Feed => Command::Feed(None),
            Button::Play => Command::Play(None),
            Button::Sleep => Command::Sleep(None),
            Button::Save => Command::Save(None),
            Button::Load => Command::Load(None),
            Button::Quit => Command::Quit,
        }
    }
}

pub struct App<'a, C: Clock> {
    keeper: &'a mut Keeper<C>,
    pub should_quit: bool,
    /// Result of the last button press
    pub message: String,
    /// What the window is currently showing
    pub snapshot: PetSnapshot,
    pub mood: Mood,
    last_tick: Instant,
}

impl<'a, C: Clock> App<'a, C> {
    /// Re-read status this often so decay shows up without input
    const TICK_RATE: Duration = Duration::from_millis(500);

    pub fn new(keeper: &'a mut Keeper<C>) -> Self {
        let (snapshot, mood) = keeper.observe();
        let message = format!("Say hi to {}!", snapshot.name);
        Self {
            keeper,
            should_quit: false,
            message,
            snapshot,
            mood,
            last_tick: Instant::now(),
        }
    }

    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            let timeout = Self::TICK_RATE.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.last_tick.elapsed() >= Self::TICK_RATE {
                self.refresh();
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Re-read the pet; this is also what applies pending decay
    pub fn refresh(&mut self) {
        (self.snapshot, self.mood) = self.keeper.observe();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let button = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Button::Quit)
            }
            KeyCode::Esc => Some(Button::Quit),
            KeyCode::Char(c) => Button::from_key(c),
            _ => None,
        };

        if let Some(button) = button {
            self.press(button);
        }
    }

    /// Same path as typing the command in the terminal loop
    pub fn press(&mut self, button: Button) {
        debug!("Button pressed: {:?}", button);
        let reply = execute(&mut *self.keeper, button.command());
        self.should_quit = reply.quit;
        // the status line is drawn from the snapshot
        self.message = reply.message.lines().next().unwrap_or_default().to_string();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::pet::Rules;
    use chrono::TimeDelta;
    use tempfile::TempDir;

    fn keeper(dir: &TempDir) -> Keeper<ManualClock> {
        Keeper::new(
            "Pixel",
            ManualClock::default(),
            Rules::default(),
            dir.path().join("pet.json"),
        )
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_app_new() {
        let dir = TempDir::new().expect("temp dir");
        let mut k = keeper(&dir);
        let app = App::new(&mut k);
        assert!(!app.should_quit);
        assert_eq!(app.mood, Mood::Content);
        assert!(app.message.contains("Pixel"));
    }

    #[test]
    fn test_feed_key_updates_snapshot() {
        let dir = TempDir::new().expect("temp dir");
        let mut k = keeper(&dir);
        let mut app = App::new(&mut k);
        app.handle_key(key('f'));
        assert_eq!(app.snapshot.hunger.value(), 30.0);
        assert_eq!(app.message, "You fed Pixel.");
    }

    #[test]
    fn test_save_and_load_keys() {
        let dir = TempDir::new().expect("temp dir");
        let mut k = keeper(&dir);
        let mut app = App::new(&mut k);
        app.handle_key(key('w'));
        assert!(app.message.starts_with("Saved to"));
        app.handle_key(key('L'));
        assert!(app.message.starts_with("Loaded from"));
    }

    #[test]
    fn test_quit_keys() {
        let dir = TempDir::new().expect("temp dir");
        let mut k = keeper(&dir);
        let mut app = App::new(&mut k);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut k = keeper(&dir);
        let mut app = App::new(&mut k);
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let mut k = keeper(&dir);
        let mut app = App::new(&mut k);
        let before = app.snapshot.clone();
        app.handle_key(key('z'));
        assert_eq!(app.snapshot, before);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_refresh_shows_decay() {
        let dir = TempDir::new().expect("temp dir");
        let mut k = keeper(&dir);
        let mut app = App::new(&mut k);
        app.keeper.clock().advance(TimeDelta::hours(8));
        app.refresh();
        assert_eq!(app.snapshot.energy.value(), 10.0);
        assert_eq!(app.mood, Mood::Sleepy);
    }
}
