use crate::catalog::Application;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::ChatEvent;
use crate::services::Dispatcher;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tracing::info;

use super::r#trait::ChatSourceTrait;

/// Каждая строка - сообщение PRIVMSG от стримера
pub struct LineChatSource<R> {
    reader: R,
}

impl LineChatSource<BufReader<Stdin>> {
    pub fn from_stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> LineChatSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    async fn run_impl(self, dispatcher: Arc<Dispatcher>, app: Arc<Application>) -> Result<()> {
        info!("Чтение команд построчно; допустимые команды для '{}':", app.name);
        info!("{}", app.help_line());

        let mut lines = self.reader.lines();
        let mut count = 0usize;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            count += 1;

            let event = ChatEvent::privmsg(true, line);
            debug_if_enabled!("Событие чата: {}", event);
            dispatcher.on_chat_event(&event, &app);
        }

        info!("Источник команд закрыт после {} сообщений", count);
        Ok(())
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send + 'static> ChatSourceTrait for LineChatSource<R> {
    async fn run(self: Box<Self>, dispatcher: Arc<Dispatcher>, app: Arc<Application>) -> Result<()> {
        (*self).run_impl(dispatcher, app).await
    }
}
