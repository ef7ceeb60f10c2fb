//! Источник событий для Dispatcher.
//!
//! Настоящий чат-клиент (подключение, авторизация, разбор IRC) живёт вне
//! этого крейта; сюда он приходит через `ChatSourceTrait`. Встроенные
//! источники: построчное чтение команд (например из stdin) и случайный
//! режим без чата.

mod line_source;
mod random_source;
mod r#trait;

pub use self::r#trait::create_chat_source;
