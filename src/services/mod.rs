pub mod aggregator;
pub mod backend;
pub mod chat_source;
pub mod dispatcher;
pub mod executor;
pub mod focus_gate;
pub mod virtual_device;

pub use backend::create_input_backend;
pub use chat_source::create_chat_source;
pub use dispatcher::Dispatcher;
pub use executor::MotionSettings;
pub use virtual_device::VirtualDevice;
