use std::io;

use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::terminal;

use crate::Px;
use crate::controller::Intent;
use crate::controller::PAN_STEP;

/// What the input layer decoded a terminal event into.
pub enum InputEvent {
    /// A gesture for the controller.
    Intent(Intent),

    /// Exit the application.
    Quit,
}

/// Convert a crossterm event into a gridlife event.
///
/// One terminal cell counts as one pixel, and the bottom row of the terminal
/// is reserved for the status line.
pub fn convert_event(event: CrossTermEvent) -> Option<InputEvent> {
    match event {
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event),

        CrossTermEvent::Resize(cols, rows) => Some(InputEvent::Intent(Intent::Resize {
            width: cols as Px,
            height: rows.saturating_sub(1) as Px,
        })),

        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<InputEvent> {
    let intent = match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return Some(InputEvent::Quit),

        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Intent::TogglePause,

        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Intent::Reset,

        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => Intent::Clear,

        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Intent::RateUp,

        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Intent::RateDown,

        KeyEvent {
            code: KeyCode::Left,
            ..
        } => Intent::Pan {
            dx: -PAN_STEP,
            dy: 0,
        },

        KeyEvent {
            code: KeyCode::Right,
            ..
        } => Intent::Pan { dx: PAN_STEP, dy: 0 },

        KeyEvent {
            code: KeyCode::Up, ..
        } => Intent::Pan {
            dx: 0,
            dy: -PAN_STEP,
        },

        KeyEvent {
            code: KeyCode::Down,
            ..
        } => Intent::Pan { dx: 0, dy: PAN_STEP },

        _ => return None,
    };

    Some(InputEvent::Intent(intent))
}

fn convert_mouse(mouse_event: MouseEvent) -> Option<InputEvent> {
    let MouseEvent {
        kind, column, row, ..
    } = mouse_event;

    let (x, y) = (column as Px, row as Px);

    let intent = match kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            Intent::PaintAt { x, y }
        }

        MouseEventKind::Up(MouseButton::Left) => Intent::PaintRelease,

        MouseEventKind::ScrollUp => Intent::ZoomIn {
            focus_x: x,
            focus_y: y,
        },

        MouseEventKind::ScrollDown => Intent::ZoomOut {
            focus_x: x,
            focus_y: y,
        },

        _ => return None,
    };

    Some(InputEvent::Intent(intent))
}

/// Puts the terminal into raw mode with mouse capture on construction and
/// restores it on drop, so a panic or early return cannot leave the shell
/// unusable.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
        )?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}
