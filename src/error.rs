use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatterError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка uinput: {0}")]
    Uinput(#[from] uinput::Error),

    #[error("Приложение не найдено: {0}")]
    ApplicationNotFound(String),

    #[error("Неизвестная клавиша: {0}")]
    InvalidKey(String),

    #[error("Повторяющееся имя ввода: {0}")]
    DuplicateInput(String),

    #[error("Ошибка бэкенда ввода: {0}")]
    Backend(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl ChatterError {
    pub fn application_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(ChatterError::ApplicationNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, ChatterError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! chatter_error {
    (invalid_key, $($arg:tt)*) => {
        $crate::error::ChatterError::InvalidKey(format!($($arg)*))
    };
    (duplicate_input, $($arg:tt)*) => {
        $crate::error::ChatterError::DuplicateInput(format!($($arg)*))
    };
    (backend, $($arg:tt)*) => {
        $crate::error::ChatterError::Backend(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::ChatterError::Permission(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::ChatterError::Internal(format!($($arg)*))
    };
}
