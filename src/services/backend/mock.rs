use crate::chatter_error;
use crate::error::Result;
use crate::events::{KeyCode, MouseButton, WindowRect};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::r#trait::InputBackendTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Title,
    Rect,
    Cursor,
    KeyPress(KeyCode),
    KeyRelease(KeyCode),
    ButtonPress(MouseButton),
    ButtonRelease(MouseButton),
    MoveTo(i32, i32),
}

/// Бэкенд для тестов: записывает все вызовы по порядку вместе со временем
/// (относительно создания) и умеет имитировать сбои.
pub struct MockBackend {
    started: Instant,
    calls: Arc<Mutex<Vec<(Duration, Call)>>>,
    title: Mutex<Option<String>>,
    rect: Mutex<Option<WindowRect>>,
    cursor: Mutex<(i32, i32)>,
    fail_press: AtomicBool,
    fail_release: AtomicBool,
    fail_move: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            calls: Arc::new(Mutex::new(Vec::new())),
            title: Mutex::new(None),
            rect: Mutex::new(None),
            cursor: Mutex::new((0, 0)),
            fail_press: AtomicBool::new(false),
            fail_release: AtomicBool::new(false),
            fail_move: AtomicBool::new(false),
        }
    }

    pub fn with_title(self, title: &str) -> Self {
        *self.title.lock() = Some(title.to_string());
        self
    }

    pub fn with_rect(self, rect: WindowRect) -> Self {
        *self.rect.lock() = Some(rect);
        self
    }

    pub fn with_cursor(self, x: i32, y: i32) -> Self {
        *self.cursor.lock() = (x, y);
        self
    }

    /// Сменить активное окно на лету (`None` - окно недоступно)
    pub fn set_title(&self, title: Option<&str>) {
        *self.title.lock() = title.map(str::to_string);
    }

    pub fn set_fail_press(&self, v: bool) {
        self.fail_press.store(v, Ordering::SeqCst);
    }

    pub fn set_fail_release(&self, v: bool) {
        self.fail_release.store(v, Ordering::SeqCst);
    }

    pub fn set_fail_move(&self, v: bool) {
        self.fail_move.store(v, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().iter().map(|(_, call)| *call).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Duration, Call)> {
        self.calls.lock().clone()
    }

    /// Только вызовы, меняющие состояние ввода
    pub fn injections(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::Title | Call::Rect | Call::Cursor))
            .collect()
    }

    pub fn cursor(&self) -> (i32, i32) {
        *self.cursor.lock()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push((self.started.elapsed(), call));
    }
}

impl InputBackendTrait for MockBackend {
    fn foreground_window_title(&self) -> Option<String> {
        self.record(Call::Title);
        self.title.lock().clone()
    }

    fn window_rect(&self) -> Option<WindowRect> {
        self.record(Call::Rect);
        *self.rect.lock()
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        self.record(Call::Cursor);
        Ok(*self.cursor.lock())
    }

    fn key_press(&self, code: KeyCode) -> Result<()> {
        self.record(Call::KeyPress(code));
        if self.fail_press.load(Ordering::SeqCst) {
            return Err(chatter_error!(backend, "mock press failure"));
        }
        Ok(())
    }

    fn key_release(&self, code: KeyCode) -> Result<()> {
        self.record(Call::KeyRelease(code));
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(chatter_error!(backend, "mock release failure"));
        }
        Ok(())
    }

    fn mouse_button_press(&self, button: MouseButton) -> Result<()> {
        self.record(Call::ButtonPress(button));
        if self.fail_press.load(Ordering::SeqCst) {
            return Err(chatter_error!(backend, "mock press failure"));
        }
        Ok(())
    }

    fn mouse_button_release(&self, button: MouseButton) -> Result<()> {
        self.record(Call::ButtonRelease(button));
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(chatter_error!(backend, "mock release failure"));
        }
        Ok(())
    }

    fn move_cursor_to(&self, x: i32, y: i32) -> Result<()> {
        self.record(Call::MoveTo(x, y));
        if self.fail_move.load(Ordering::SeqCst) {
            return Err(chatter_error!(backend, "mock move failure"));
        }
        *self.cursor.lock() = (x, y);
        Ok(())
    }
}
