use crate::catalog::Application;
use crate::config::Config;
use crate::error::Result;
use crate::events::{KeyCode, MouseButton, WindowRect};
use std::sync::Arc;

/// Примитивы ОС, которые вызывает ядро диспетчеризации.
///
/// Запросы к окну возвращают `None`, когда информация недоступна; ядро
/// трактует это как "окно не в фокусе" либо как пустое действие.
pub trait InputBackendTrait: Send + Sync {
    fn foreground_window_title(&self) -> Option<String>;

    /// Прямоугольник активного окна
    fn window_rect(&self) -> Option<WindowRect>;

    fn cursor_position(&self) -> Result<(i32, i32)>;

    fn key_press(&self, code: KeyCode) -> Result<()>;

    fn key_release(&self, code: KeyCode) -> Result<()>;

    fn mouse_button_press(&self, button: MouseButton) -> Result<()>;

    fn mouse_button_release(&self, button: MouseButton) -> Result<()>;

    fn move_cursor_to(&self, x: i32, y: i32) -> Result<()>;
}

/// Factory function to create an appropriate input backend based on the dry_run flag
pub fn create_input_backend(
    config: &Config,
    application: &Application,
    dry_run: bool,
) -> Result<Arc<dyn InputBackendTrait>> {
    if dry_run {
        let title = config
            .dry_run
            .window_title
            .clone()
            .or_else(|| application.focus_patterns.first().map(|p| format!("{} - dry_run", p)))
            .unwrap_or_else(|| "dry_run".to_string());
        Ok(Arc::new(super::dry_run::DryRunBackend::new(title, config.dry_run.window_rect)))
    } else {
        Ok(Arc::new(super::xdotool::XdotoolBackend::new("Chatter-Rust Virtual Device")?))
    }
}
