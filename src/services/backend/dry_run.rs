use crate::error::Result;
use crate::events::{KeyCode, MouseButton, WindowRect};
use parking_lot::Mutex;
use tracing::info;

use super::r#trait::InputBackendTrait;

/// Бэкенд сухого запуска: ничего не нажимает, только логирует.
/// Курсор эмулируется, чтобы движения мыши были видны в логе.
pub struct DryRunBackend {
    window_title: String,
    window_rect: WindowRect,
    cursor: Mutex<(i32, i32)>,
}

impl DryRunBackend {
    pub fn new(window_title: String, window_rect: WindowRect) -> Self {
        info!("Dry-run режим - бэкенд ввода работает в режиме эмуляции (окно: '{}' {})", window_title, window_rect);
        let center = (
            window_rect.left + (window_rect.right - window_rect.left) / 2,
            window_rect.top + (window_rect.bottom - window_rect.top) / 2,
        );
        Self {
            window_title,
            window_rect,
            cursor: Mutex::new(center),
        }
    }
}

impl InputBackendTrait for DryRunBackend {
    fn foreground_window_title(&self) -> Option<String> {
        Some(self.window_title.clone())
    }

    fn window_rect(&self) -> Option<WindowRect> {
        Some(self.window_rect)
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        Ok(*self.cursor.lock())
    }

    fn key_press(&self, code: KeyCode) -> Result<()> {
        info!("[DRY RUN] Нажатие {}", code);
        Ok(())
    }

    fn key_release(&self, code: KeyCode) -> Result<()> {
        info!("[DRY RUN] Отпускание {}", code);
        Ok(())
    }

    fn mouse_button_press(&self, button: MouseButton) -> Result<()> {
        info!("[DRY RUN] Нажатие {}", button);
        Ok(())
    }

    fn mouse_button_release(&self, button: MouseButton) -> Result<()> {
        info!("[DRY RUN] Отпускание {}", button);
        Ok(())
    }

    fn move_cursor_to(&self, x: i32, y: i32) -> Result<()> {
        *self.cursor.lock() = (x, y);
        info!("[DRY RUN] Курсор -> ({}, {})", x, y);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_tracks_cursor() {
        let backend = DryRunBackend::new("Minecraft - dry_run".to_string(), WindowRect::new(0, 0, 800, 600));
        assert_eq!(backend.foreground_window_title().as_deref(), Some("Minecraft - dry_run"));
        assert_eq!(backend.cursor_position().unwrap(), (400, 300));

        backend.move_cursor_to(10, 20).unwrap();
        assert_eq!(backend.cursor_position().unwrap(), (10, 20));
        assert!(backend.key_press(KeyCode::new(17)).is_ok());
    }
}
