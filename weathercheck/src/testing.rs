//! Test helpers for components and screens
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"l"`, `"esc"` or `"ctrl+c"`
//! - [`RenderHarness`]: render into an in-memory terminal and read it back as text
//! - [`ActionAssertions`]: assertions over the actions a component emitted
//!
//! ```ignore
//! use weathercheck::testing::{key, ActionAssertions, RenderHarness};
//!
//! let actions: Vec<_> = screen
//!     .handle_event(&EventKind::Key(key("l")), props)
//!     .into_iter()
//!     .collect();
//! actions.assert_first(Action::LocateRequest);
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use weathercheck_core::Action;

/// Parse a key string like `"q"`, `"enter"`, `"f5"` or `"ctrl+c"`.
pub fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    let (prefix, key_part) = match key_str.rsplit_once('+') {
        // a lone "+" is the plus key
        Some((prefix, "")) => (prefix, "+"),
        Some(split) => split,
        None => ("", key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c => {
            let mut chars = c.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// [`parse_key`] for tests.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {s:?}"))
}

/// Renders into a [`TestBackend`] of fixed size
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal should build");
        Self { terminal }
    }

    /// Draw one frame and return the buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal.draw(draw).expect("draw to test backend");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, rows joined by newlines, without styles.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(self.render(draw))
    }
}

/// Buffer text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assertions over emitted actions
pub trait ActionAssertions {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: Action);
    fn assert_contains(&self, expected: Action);
}

impl ActionAssertions for Vec<Action> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got {self:?}");
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "unexpected action count in {self:?}");
    }

    fn assert_first(&self, expected: Action) {
        assert_eq!(
            self.first(),
            Some(&expected),
            "unexpected first action in {self:?}"
        );
    }

    fn assert_contains(&self, expected: Action) {
        assert!(
            self.contains(&expected),
            "expected {expected:?} in {self:?}"
        );
    }
}
