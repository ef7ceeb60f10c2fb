//! Бэкенд инъекции ввода: единственное место, где система трогает ОС.
//!
//! Модуль отвечает только за примитивы (нажать/отпустить, сдвинуть курсор,
//! узнать заголовок и прямоугольник активного окна). Решения о том, что и
//! когда нажимать, принимают Dispatcher и Executor.

mod dry_run;
#[cfg(test)]
pub mod mock;
mod r#trait;
mod xdotool;

pub use self::r#trait::{create_input_backend, InputBackendTrait};
