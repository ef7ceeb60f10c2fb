use crate::catalog::InputDefinition;
use crate::mappings::KeyCodes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::time::Instant;

/// Код клавиши (evdev коды)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match KeyCodes::reverse_translate(self.0) {
            Some(name) => write!(f, "KEY_{}", name.to_uppercase()),
            None => write!(f, "KEY_{}", self.0),
        }
    }
}

/// Кнопка мыши, удерживаемая как клавиша
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// evdev код BTN_*
    pub fn code(&self) -> u16 {
        match self {
            MouseButton::Left => 0x110,
            MouseButton::Right => 0x111,
            MouseButton::Middle => 0x112,
        }
    }

    /// Номер кнопки в терминах X11 (xdotool)
    pub fn x11_button(&self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MOUSE{}", self.x11_button())
    }
}

/// Направление движения курсора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Смещение за один шаг
    pub fn delta(&self, step: i32) -> (i32, i32) {
        match self {
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Запрос на ввод, созданный по совпавшему сообщению из чата.
/// После создания не изменяется.
#[derive(Debug, Clone)]
pub struct InputRequest {
    pub raw_text: String,
    pub matched_input: Arc<InputDefinition>,
    pub arrival_time: Instant,
    pub is_long_variant: bool,
}

impl InputRequest {
    pub fn new(raw_text: impl Into<String>, matched_input: Arc<InputDefinition>, is_long_variant: bool) -> Self {
        Self {
            raw_text: raw_text.into(),
            matched_input,
            arrival_time: Instant::now(),
            is_long_variant,
        }
    }

    /// Нормализованное имя ввода, по которому идёт голосование
    pub fn vote_key(&self) -> String {
        self.matched_input.name.to_lowercase()
    }
}

impl fmt::Display for InputRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = if self.is_long_variant { "long" } else { "short" };
        write!(f, "'{}' -> {} ({})", self.raw_text, self.matched_input.name, variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_code_display_uses_key_name() {
        assert_eq!(KeyCode::new(17).to_string(), "KEY_W");
        assert_eq!(KeyCode::new(999).to_string(), "KEY_999");
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Right.delta(10), (10, 0));
        assert_eq!(Direction::Left.delta(10), (-10, 0));
        assert_eq!(Direction::Up.delta(5), (0, -5));
        assert_eq!(Direction::Down.delta(5), (0, 5));
    }

    #[test]
    fn test_mouse_button_codes() {
        assert_eq!(MouseButton::Left.code(), 272);
        assert_eq!(MouseButton::Right.code(), 273);
        assert_eq!(MouseButton::Middle.code(), 274);
        assert_eq!(MouseButton::Middle.to_string(), "MOUSE2");
    }
}
