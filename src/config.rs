use crate::events::{Direction, WindowRect};
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub dispatch: DispatchConfig,
    pub mouse: MouseConfig,
    pub dry_run: DryRunConfig,
    pub random: RandomConfig,
    /// Приложение по имени или номеру (с 1)
    pub application: Option<String>,
    /// Дополнительные приложения, добавляются после встроенных
    pub applications: Vec<ApplicationConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Как совпавшие команды попадают к исполнителю
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// Через окно дебаунса с голосованием большинством
    Debounced,
    /// Сразу в исполнитель, без агрегации
    Direct,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
    pub debounce_window_ms: u64,
    pub broadcaster_only: bool,
}

impl DispatchConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MouseConfig {
    pub tick_ms: u64,
    pub step_px: i32,
    pub edge_buffer_px: i32,
}

impl MouseConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Случайный режим: вместо чата вводы выбираются случайно
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RandomConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    /// Как часто проверять фокус, пока окно приложения не активно
    pub focus_poll_ms: u64,
}

impl RandomConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn focus_poll(&self) -> Duration {
        Duration::from_millis(self.focus_poll_ms)
    }
}

/// Параметры эмулируемого окна для режима сухого запуска
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DryRunConfig {
    /// Заголовок окна; по умолчанию первый паттерн выбранного приложения
    pub window_title: Option<String>,
    pub window_rect: WindowRect,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApplicationConfig {
    pub name: String,
    pub window_titles: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<InputConfig>,
}

/// Ввод задаётся либо клавишей (`key`), либо направлением мыши (`direction`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    pub short_ms: u64,
    pub long_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            dispatch: DispatchConfig {
                mode: DispatchMode::Debounced,
                debounce_window_ms: 200,
                broadcaster_only: true,
            },
            mouse: MouseConfig {
                tick_ms: 25,
                step_px: 10,
                edge_buffer_px: 10,
            },
            dry_run: DryRunConfig {
                window_title: None,
                window_rect: WindowRect::new(0, 0, 1920, 1080),
            },
            random: RandomConfig {
                enabled: false,
                interval_ms: 250,
                focus_poll_ms: 1000,
            },
            application: None,
            applications: Vec::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Отсутствующий файл не ошибка - остаются значения по умолчанию
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("CHATTER_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        if self.dispatch.debounce_window_ms == 0 {
            anyhow::bail!("debounce_window_ms должно быть больше 0");
        }

        if self.mouse.tick_ms == 0 {
            anyhow::bail!("mouse.tick_ms должно быть больше 0");
        }

        if self.mouse.step_px <= 0 {
            anyhow::bail!("mouse.step_px должно быть больше 0");
        }

        if self.random.interval_ms == 0 || self.random.focus_poll_ms == 0 {
            anyhow::bail!("random.interval_ms и random.focus_poll_ms должны быть больше 0");
        }

        if self.mouse.edge_buffer_px < 0 {
            anyhow::bail!("mouse.edge_buffer_px не может быть отрицательным");
        }

        // Валидация приложений; клавиши и дубликаты проверяет каталог
        for (i, app) in self.applications.iter().enumerate() {
            if app.name.trim().is_empty() {
                anyhow::bail!("Пустое имя приложения #{}", i + 1);
            }

            if app.window_titles.is_empty() {
                anyhow::bail!("Приложение '{}' не задаёт window_titles", app.name);
            }

            for input in &app.inputs {
                if input.name.trim().is_empty() {
                    anyhow::bail!("Пустое имя ввода в приложении '{}'", app.name);
                }
            }
        }

        Ok(())
    }
}
