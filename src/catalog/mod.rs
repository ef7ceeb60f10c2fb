//! Каталог приложений: какие команды чата понимает каждое приложение и в
//! каких окнах их разрешено выполнять. После загрузки только читается.

mod presets;

use crate::config::{ApplicationConfig, Config, InputConfig};
use crate::error::{ChatterError, Result};
use crate::events::{Direction, KeyCode, MouseButton};
use crate::mappings::{KeyCodes, MouseButtonNames};
use crate::chatter_error;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Класс устройства - отдельный домен вытеснения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Key,
    MouseAxis,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceClass::Key => f.write_str("key"),
            DeviceClass::MouseAxis => f.write_str("mouse-axis"),
        }
    }
}

/// Что именно удерживается для ввода класса `Key`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    Key(KeyCode),
    Button(MouseButton),
}

impl fmt::Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputCode::Key(code) => write!(f, "{}", code),
            InputCode::Button(button) => write!(f, "{}", button),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Key(InputCode),
    MouseAxis(Direction),
}

/// Один именованный ввод приложения
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDefinition {
    pub name: String,
    pub kind: InputKind,
    pub short_duration: Duration,
    pub long_duration: Duration,
}

impl InputDefinition {
    pub fn new(name: impl Into<String>, kind: InputKind, short_ms: u64, long_ms: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            short_duration: Duration::from_millis(short_ms),
            long_duration: Duration::from_millis(long_ms),
        }
    }

    /// Ввод-клавиша по имени клавиши (`w`, `enter`, `mouse1`, ...)
    pub fn key(name: impl Into<String>, key_name: &str, short_ms: u64, long_ms: u64) -> Result<Self> {
        let code = match MouseButtonNames::translate(key_name) {
            Some(button) => InputCode::Button(button),
            None => {
                let code = KeyCodes::translate(key_name)
                    .map_err(|e| chatter_error!(invalid_key, "{}", e))?;
                InputCode::Key(KeyCode::new(code))
            }
        };
        Ok(Self::new(name, InputKind::Key(code), short_ms, long_ms))
    }

    pub fn mouse(name: impl Into<String>, direction: Direction, short_ms: u64, long_ms: u64) -> Self {
        Self::new(name, InputKind::MouseAxis(direction), short_ms, long_ms)
    }

    pub fn device_class(&self) -> DeviceClass {
        match self.kind {
            InputKind::Key(_) => DeviceClass::Key,
            InputKind::MouseAxis(_) => DeviceClass::MouseAxis,
        }
    }

    pub fn duration(&self, long_variant: bool) -> Duration {
        if long_variant {
            self.long_duration
        } else {
            self.short_duration
        }
    }

    /// Регистронезависимое сравнение с текстом сообщения
    pub fn matches(&self, text: &str) -> bool {
        self.name.to_lowercase() == text.to_lowercase()
    }

    /// Длинный вариант - когда зритель набрал имя точно в каноническом регистре
    pub fn is_long_variant(&self, trimmed_text: &str) -> bool {
        trimmed_text == self.name
    }

    fn from_config(config: &InputConfig) -> Result<Self> {
        match (&config.key, config.direction) {
            (Some(key), None) => Self::key(&config.name, key, config.short_ms, config.long_ms),
            (None, Some(direction)) => Ok(Self::mouse(&config.name, direction, config.short_ms, config.long_ms)),
            _ => Err(ChatterError::Config(anyhow::anyhow!(
                "Ввод '{}' должен задавать ровно одно из полей key/direction",
                config.name
            ))),
        }
    }
}

/// Приложение: окна, в которых разрешён ввод, и список его вводов
#[derive(Debug, Clone)]
pub struct Application {
    pub name: String,
    pub focus_patterns: Vec<String>,
    pub inputs: Vec<Arc<InputDefinition>>,
}

impl Application {
    pub fn new(name: impl Into<String>, focus_patterns: Vec<String>, inputs: Vec<InputDefinition>) -> Result<Self> {
        let name = name.into();

        let mut patterns: Vec<String> = Vec::with_capacity(focus_patterns.len());
        for pattern in focus_patterns {
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }

        let mut seen: Vec<String> = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let lower = input.name.to_lowercase();
            if seen.contains(&lower) {
                return Err(chatter_error!(duplicate_input, "'{}' в приложении '{}'", input.name, name));
            }
            seen.push(lower);
        }

        Ok(Self {
            name,
            focus_patterns: patterns,
            inputs: inputs.into_iter().map(Arc::new).collect(),
        })
    }

    /// Найти ввод по тексту сообщения (регистронезависимо)
    pub fn find_input(&self, text: &str) -> Option<&Arc<InputDefinition>> {
        self.inputs.iter().find(|input| input.matches(text))
    }

    /// Подсказка для зрителей со списком допустимых команд
    pub fn help_line(&self) -> String {
        let names: Vec<&str> = self.inputs.iter().map(|input| input.name.as_str()).collect();
        format!(
            "Valid inputs: {} (Note: Uppercase inputs hold the button down longer; lowercase inputs press the button once.)",
            names.join(", ")
        )
    }

    fn from_config(config: &ApplicationConfig) -> Result<Self> {
        let inputs = config
            .inputs
            .iter()
            .map(InputDefinition::from_config)
            .collect::<Result<Vec<_>>>()?;
        Self::new(&config.name, config.window_titles.clone(), inputs)
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} вводов)", self.name, self.inputs.len())
    }
}

/// Реестр приложений
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    applications: Vec<Arc<Application>>,
}

impl Catalog {
    pub fn from_configs<'a>(configs: impl IntoIterator<Item = &'a ApplicationConfig>) -> Result<Self> {
        let applications = configs
            .into_iter()
            .map(|config| Application::from_config(config).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { applications })
    }

    /// Встроенные пресеты
    #[cfg(test)]
    pub fn builtin() -> Result<Self> {
        Self::from_configs(presets::builtin_applications().iter())
    }

    /// Пресеты плюс приложения из конфигурации (добавляются в конец)
    pub fn load(config: &Config) -> Result<Self> {
        let presets = presets::builtin_applications();
        Self::from_configs(presets.iter().chain(config.applications.iter()))
    }

    pub fn applications(&self) -> &[Arc<Application>] {
        &self.applications
    }

    /// Число - позиция в списке (с 1), иначе имя без учёта регистра
    pub fn resolve(&self, name_or_index: &str) -> Result<Arc<Application>> {
        let query = name_or_index.trim();

        let found = if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
            query
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| self.applications.get(index))
        } else {
            let lower = query.to_lowercase();
            self.applications.iter().find(|app| app.name.to_lowercase() == lower)
        };

        match found {
            Some(app) => Ok(Arc::clone(app)),
            None => ChatterError::application_not_found(query),
        }
    }
}
