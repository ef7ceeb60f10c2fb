use crate::chatter_error;
use crate::error::Result;
use crate::events::{KeyCode, MouseButton, WindowRect};
use crate::services::VirtualDevice;
use std::collections::HashMap;
use std::process::Command;
use tracing::debug;

use super::r#trait::InputBackendTrait;

/// Linux/X11 бэкенд: клавиши и кнопки мыши через виртуальное uinput
/// устройство, окно и курсор через утилиту xdotool.
pub struct XdotoolBackend {
    device: VirtualDevice,
}

impl XdotoolBackend {
    pub fn new(device_name: &str) -> Result<Self> {
        let backend = Self {
            device: VirtualDevice::new(device_name)?,
        };
        backend.test()?;
        Ok(backend)
    }

    fn test(&self) -> Result<()> {
        Self::run(&["version"]).map(|_| ())
    }

    fn run(args: &[&str]) -> Result<String> {
        let output = Command::new("xdotool").args(args).output().map_err(|e| {
            debug!("xdotool не найден или не работает: {}", e);
            chatter_error!(backend, "xdotool не найден: {}", e)
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("xdotool {:?} вернул ошибку: {}", args, stderr);
            return Err(chatter_error!(backend, "xdotool {:?} вернул ошибку: {}", args, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Разбор вывода `xdotool ... --shell` вида `KEY=value` по строкам
fn parse_shell_vars(output: &str) -> HashMap<&str, &str> {
    output
        .lines()
        .filter_map(|line| line.trim().split_once('='))
        .collect()
}

fn shell_var<T: std::str::FromStr>(vars: &HashMap<&str, &str>, key: &str) -> Option<T> {
    vars.get(key).and_then(|value| value.parse().ok())
}

fn parse_geometry(output: &str) -> Option<WindowRect> {
    let vars = parse_shell_vars(output);
    Some(WindowRect::from_geometry(
        shell_var(&vars, "X")?,
        shell_var(&vars, "Y")?,
        shell_var(&vars, "WIDTH")?,
        shell_var(&vars, "HEIGHT")?,
    ))
}

fn parse_mouse_location(output: &str) -> Option<(i32, i32)> {
    let vars = parse_shell_vars(output);
    Some((shell_var(&vars, "X")?, shell_var(&vars, "Y")?))
}

impl InputBackendTrait for XdotoolBackend {
    fn foreground_window_title(&self) -> Option<String> {
        match Self::run(&["getactivewindow", "getwindowname"]) {
            Ok(title) => {
                debug!("xdotool получил заголовок окна: '{}'", title);
                Some(title)
            }
            Err(e) => {
                debug!("Заголовок активного окна недоступен: {}", e);
                None
            }
        }
    }

    fn window_rect(&self) -> Option<WindowRect> {
        let output = Self::run(&["getactivewindow", "getwindowgeometry", "--shell"]).ok()?;
        let rect = parse_geometry(&output);
        debug!("xdotool получил геометрию окна: {:?}", rect);
        rect
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        let output = Self::run(&["getmouselocation", "--shell"])?;
        parse_mouse_location(&output)
            .ok_or_else(|| chatter_error!(backend, "Не удалось разобрать позицию курсора: '{}'", output))
    }

    fn key_press(&self, code: KeyCode) -> Result<()> {
        self.device.press(code.value())
    }

    fn key_release(&self, code: KeyCode) -> Result<()> {
        self.device.release(code.value())
    }

    fn mouse_button_press(&self, button: MouseButton) -> Result<()> {
        self.device.press(button.code())
    }

    fn mouse_button_release(&self, button: MouseButton) -> Result<()> {
        self.device.release(button.code())
    }

    fn move_cursor_to(&self, x: i32, y: i32) -> Result<()> {
        Self::run(&["mousemove", &x.to_string(), &y.to_string()]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geometry() {
        let output = "WINDOW=79691781\nX=100\nY=50\nWIDTH=800\nHEIGHT=600\nSCREEN=0";
        assert_eq!(parse_geometry(output), Some(WindowRect::new(100, 50, 900, 650)));
        assert_eq!(parse_geometry("WINDOW=1\nX=1"), None);
    }

    #[test]
    fn test_parse_mouse_location() {
        let output = "X=500\nY=321\nSCREEN=0\nWINDOW=79691781";
        assert_eq!(parse_mouse_location(output), Some((500, 321)));
        assert_eq!(parse_mouse_location("garbage"), None);
    }
}
