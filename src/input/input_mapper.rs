//! Keyboard mapping from raw key events to application actions

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Reset camera and controllers to the start of the corridor (R)
    ResetCamera,
    /// Toggle fullscreen mode (F)
    ToggleFullscreen,
    /// Switch between fixed-factor and half-life smoothing (G)
    ToggleSmoothing,
    /// Jump to the next section (PageDown)
    NextSection,
    /// Jump to the previous section (PageUp)
    PrevSection,
    /// Jump to the first section (Home)
    FirstSection,
    /// Jump to the last section (End)
    LastSection,
    /// Jump to a section by zero-based index (Digit1..Digit9)
    SelectSection(usize),
}

/// Maps raw keyboard events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Only presses produce actions; releases and unmapped keys return `None`.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyG => Some(InputAction::ToggleSmoothing),
            KeyCode::PageDown => Some(InputAction::NextSection),
            KeyCode::PageUp => Some(InputAction::PrevSection),
            KeyCode::Home => Some(InputAction::FirstSection),
            KeyCode::End => Some(InputAction::LastSection),
            _ => Self::section_digit(key).map(InputAction::SelectSection),
        }
    }

    fn section_digit(key: KeyCode) -> Option<usize> {
        let index = match key {
            KeyCode::Digit1 => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            KeyCode::Digit7 => 6,
            KeyCode::Digit8 => 7,
            KeyCode::Digit9 => 8,
            _ => return None,
        };
        Some(index)
    }
}
