pub mod chat;
pub mod input;
pub mod window;

pub use chat::ChatEvent;
pub use input::{Direction, InputRequest, KeyCode, MouseButton};
pub use window::WindowRect;
