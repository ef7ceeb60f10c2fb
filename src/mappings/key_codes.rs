use crate::events::MouseButton;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Трансляция имён клавиш из каталога в evdev коды и обратно
pub struct KeyCodes;

// Базовая таблица: первое имя для кода считается каноническим
static KEY_TABLE: &[(&str, u16)] = &[
    // Буквенные клавиши
    ("a", 30), ("b", 48), ("c", 46), ("d", 32), ("e", 18), ("f", 33),
    ("g", 34), ("h", 35), ("i", 23), ("j", 36), ("k", 37), ("l", 38),
    ("m", 50), ("n", 49), ("o", 24), ("p", 25), ("q", 16), ("r", 19),
    ("s", 31), ("t", 20), ("u", 22), ("v", 47), ("w", 17), ("x", 45),
    ("y", 21), ("z", 44),

    // Цифровые клавиши (верхний ряд)
    ("1", 2), ("2", 3), ("3", 4), ("4", 5), ("5", 6),
    ("6", 7), ("7", 8), ("8", 9), ("9", 10), ("0", 11),

    // Специальные клавиши
    ("space", 57),
    ("enter", 28),
    ("escape", 1),
    ("esc", 1),
    ("backspace", 14),
    ("back_space", 14),
    ("tab", 15),

    // Модификаторы (удерживаются так же, как обычные клавиши)
    ("ctrl", 29),
    ("control", 29),
    ("alt", 56),
    ("shift", 42),
    ("super", 125),

    // Стрелки
    ("up", 103),
    ("down", 108),
    ("left", 105),
    ("right", 106),

    // Функциональные клавиши
    ("f1", 59), ("f2", 60), ("f3", 61), ("f4", 62), ("f5", 63), ("f6", 64),
    ("f7", 65), ("f8", 66), ("f9", 67), ("f10", 68), ("f11", 87), ("f12", 88),
];

static NAME_TO_CODE: Lazy<HashMap<&'static str, u16>> =
    Lazy::new(|| KEY_TABLE.iter().copied().collect());

static CODE_TO_NAME: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(name, code) in KEY_TABLE {
        map.entry(code).or_insert(name);
    }
    map
});

impl KeyCodes {
    /// Получить evdev код клавиши по её имени (регистронезависимо)
    pub fn translate(key_name: &str) -> Result<u16, String> {
        let normalized = key_name.trim().to_lowercase();
        NAME_TO_CODE
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown key: {}", key_name))
    }

    /// Получить каноническое имя клавиши по evdev коду
    pub fn reverse_translate(keycode: u16) -> Option<&'static str> {
        CODE_TO_NAME.get(&keycode).copied()
    }
}

/// Имена кнопок мыши: `mouse1` - левая, `mouse2` - средняя, `mouse3` - правая
pub struct MouseButtonNames;

impl MouseButtonNames {
    pub fn translate(name: &str) -> Option<MouseButton> {
        match name.trim().to_lowercase().as_str() {
            "mouse1" => Some(MouseButton::Left),
            "mouse2" => Some(MouseButton::Middle),
            "mouse3" => Some(MouseButton::Right),
            _ => None,
        }
    }
}
