use crate::catalog::Application;
use crate::debug_if_enabled;
use crate::services::backend::InputBackendTrait;
use std::sync::Arc;

/// Проверка, что активное окно принадлежит приложению.
///
/// Заголовок сравнивается с паттернами приложения по вхождению подстроки с
/// учётом регистра. Если заголовок недоступен, ввод запрещён.
pub struct FocusGate {
    backend: Arc<dyn InputBackendTrait>,
}

impl FocusGate {
    pub fn new(backend: Arc<dyn InputBackendTrait>) -> Self {
        Self { backend }
    }

    pub fn is_focused(&self, app: &Application) -> bool {
        let Some(title) = self.backend.foreground_window_title() else {
            debug_if_enabled!("Заголовок активного окна недоступен - считаем, что '{}' не в фокусе", app.name);
            return false;
        };

        let focused = app.focus_patterns.iter().any(|pattern| title.contains(pattern.as_str()));
        debug_if_enabled!("Окно '{}' в фокусе для '{}': {}", title, app.name, focused);
        focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InputDefinition;
    use crate::services::backend::mock::MockBackend;

    fn app(patterns: &[&str]) -> Application {
        Application::new(
            "Emu",
            patterns.iter().map(|p| p.to_string()).collect(),
            vec![InputDefinition::key("A", "z", 125, 1000).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_title_containing_pattern_is_focused() {
        let gate = FocusGate::new(Arc::new(MockBackend::new().with_title("mGBA - 0.10.2 - Pokemon")));
        assert!(gate.is_focused(&app(&["mGBA", "VisualBoyAdvance"])));
    }

    #[test]
    fn test_containment_is_case_sensitive() {
        let gate = FocusGate::new(Arc::new(MockBackend::new().with_title("mgba - pokemon")));
        assert!(!gate.is_focused(&app(&["mGBA"])));
    }

    #[test]
    fn test_unrelated_title_is_not_focused() {
        let gate = FocusGate::new(Arc::new(MockBackend::new().with_title("Firefox")));
        assert!(!gate.is_focused(&app(&["DeSmuME", "Citra"])));
    }

    #[test]
    fn test_missing_title_fails_closed() {
        let gate = FocusGate::new(Arc::new(MockBackend::new()));
        assert!(!gate.is_focused(&app(&["DeSmuME"])));
        // Пустой паттерн совпал бы с любым заголовком, но заголовка нет
        assert!(!gate.is_focused(&app(&[""])));
    }

    #[test]
    fn test_empty_pattern_list_is_never_focused() {
        let gate = FocusGate::new(Arc::new(MockBackend::new().with_title("Anything")));
        assert!(!gate.is_focused(&app(&[])));
    }
}
