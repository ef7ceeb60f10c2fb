use crate::config::{ApplicationConfig, InputConfig};
use crate::events::Direction;

fn key(name: &str, key: &str, short_ms: u64, long_ms: u64) -> InputConfig {
    InputConfig {
        name: name.to_string(),
        key: Some(key.to_string()),
        direction: None,
        short_ms,
        long_ms,
    }
}

fn mouse(name: &str, direction: Direction, short_ms: u64, long_ms: u64) -> InputConfig {
    InputConfig {
        name: name.to_string(),
        key: None,
        direction: Some(direction),
        short_ms,
        long_ms,
    }
}

fn app(name: &str, window_titles: &[&str], inputs: Vec<InputConfig>) -> ApplicationConfig {
    ApplicationConfig {
        name: name.to_string(),
        window_titles: window_titles.iter().map(|title| title.to_string()).collect(),
        inputs,
    }
}

/// Встроенные приложения в порядке отображения
pub fn builtin_applications() -> Vec<ApplicationConfig> {
    vec![
        app(
            "DS Emulators (DeSmuME, Citra, etc.)",
            &["DeSmuME", "Citra"],
            vec![
                key("UP", "up", 125, 1000),
                key("DOWN", "down", 125, 1000),
                key("LEFT", "left", 125, 1000),
                key("RIGHT", "right", 125, 1000),
                key("X", "a", 125, 1000),
                key("Y", "s", 125, 1000),
                key("A", "z", 125, 1000),
                key("B", "x", 125, 1000),
                key("L", "q", 125, 1000),
                key("R", "w", 125, 1000),
                key("START", "enter", 125, 1000),
                key("SELECT", "backspace", 125, 1000),
            ],
        ),
        app(
            "Gameboy Emulators (mGBA, etc.)",
            &["mGBA", "VisualBoyAdvance"],
            vec![
                key("UP", "up", 125, 1000),
                key("DOWN", "down", 125, 1000),
                key("LEFT", "left", 125, 1000),
                key("RIGHT", "right", 125, 1000),
                key("A", "z", 125, 1000),
                key("B", "x", 125, 1000),
                key("L", "a", 125, 1000),
                key("R", "s", 125, 1000),
                key("START", "enter", 125, 1000),
                key("SELECT", "backspace", 125, 1000),
            ],
        ),
        app(
            "Minecraft",
            &["Minecraft", "Cinnamon", "Lunar Client", "Badlion Client"],
            vec![
                key("W", "w", 200, 1000),
                key("A", "a", 200, 1000),
                key("S", "s", 200, 1000),
                key("D", "d", 200, 1000),
                key("SPACE", "space", 200, 1000),
                key("SHIFT", "shift", 200, 1000),
                key("CTRL", "ctrl", 200, 1000),
                key("E", "e", 200, 1000),
                key("Q", "q", 200, 1000),
                key("1", "1", 200, 1000),
                key("2", "2", 200, 1000),
                key("3", "3", 200, 1000),
                key("4", "4", 200, 1000),
                key("5", "5", 200, 1000),
                key("6", "6", 200, 1000),
                key("7", "7", 200, 1000),
                key("8", "8", 200, 1000),
                key("9", "9", 200, 1000),
                key("MOUSE1", "mouse1", 200, 1000),
                key("MOUSE2", "mouse2", 200, 1000),
                key("MOUSE3", "mouse3", 200, 1000),
                mouse("LEFT", Direction::Left, 250, 500),
                mouse("RIGHT", Direction::Right, 250, 500),
                mouse("UP", Direction::Up, 250, 500),
                mouse("DOWN", Direction::Down, 250, 500),
            ],
        ),
        app(
            "Counter-Strike Source",
            &["Counter-Strike Source"],
            vec![
                key("W", "w", 500, 1500),
                key("A", "a", 500, 1000),
                key("D", "d", 500, 1000),
                key("1", "1", 100, 100),
                key("2", "2", 100, 100),
                key("F1", "f1", 100, 100),
                key("ENTER", "enter", 100, 100),
                key("MOUSE1", "mouse1", 200, 750),
                mouse("LEFT", Direction::Left, 250, 500),
                mouse("RIGHT", Direction::Right, 250, 500),
            ],
        ),
    ]
}
