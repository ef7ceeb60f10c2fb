use crate::catalog::Application;
use crate::config::RandomConfig;
use crate::error::Result;
use crate::services::Dispatcher;
use std::sync::Arc;

/// Trait for chat sources feeding the dispatcher
#[async_trait::async_trait]
pub trait ChatSourceTrait {
    /// Читать события до конца потока, передавая их в Dispatcher
    async fn run(self: Box<Self>, dispatcher: Arc<Dispatcher>, app: Arc<Application>) -> Result<()>;
}

/// Factory function: random inputs when enabled, stdin lines otherwise
pub fn create_chat_source(random: &RandomConfig) -> Box<dyn ChatSourceTrait + Send> {
    if random.enabled {
        Box::new(super::random_source::RandomChatSource::from_config(random))
    } else {
        Box::new(super::line_source::LineChatSource::from_stdin())
    }
}
