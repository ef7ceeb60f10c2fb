use crate::catalog::{Application, InputDefinition};
use crate::config::{DispatchConfig, DispatchMode};
use crate::debug_if_enabled;
use crate::events::{ChatEvent, InputRequest};
use crate::services::aggregator::Aggregator;
use crate::services::backend::InputBackendTrait;
use crate::services::executor::{Executor, MotionSettings};
use crate::services::focus_gate::FocusGate;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

const SETTLE_MARGIN: Duration = Duration::from_millis(50);

/// Точка входа для сообщений чата.
///
/// Сопоставляет сообщение с вводом приложения, проверяет фокус и передаёт
/// заявку в Aggregator (или сразу в Executor в режиме `direct`). Ничего не
/// возвращает и не паникует: все отказы только логируются.
pub struct Dispatcher {
    focus_gate: FocusGate,
    executor: Arc<Executor>,
    aggregator: Option<Aggregator>,
    broadcaster_only: bool,
    /// Сколько ждать, пока последняя пачка гарантированно разрешится
    settle_delay: Duration,
}

impl Dispatcher {
    /// Должен вызываться внутри tokio runtime
    pub fn new(backend: Arc<dyn InputBackendTrait>, dispatch: &DispatchConfig, motion: MotionSettings) -> Self {
        info!(
            "Инициализация Dispatcher (режим: {:?}, окно дебаунса: {}мс, только стример: {})",
            dispatch.mode, dispatch.debounce_window_ms, dispatch.broadcaster_only
        );

        let executor = Arc::new(Executor::new(Arc::clone(&backend), motion));

        let settle_delay = match dispatch.mode {
            DispatchMode::Direct => Duration::ZERO,
            DispatchMode::Debounced => dispatch.debounce_window() + SETTLE_MARGIN,
        };

        let aggregator = match dispatch.mode {
            DispatchMode::Direct => None,
            DispatchMode::Debounced => {
                let (aggregator, mut winners) = Aggregator::new(dispatch.debounce_window());
                let executor = Arc::clone(&executor);
                tokio::spawn(async move {
                    while let Some(winner) = winners.recv().await {
                        executor.run(Arc::clone(&winner.matched_input), winner.is_long_variant);
                    }
                });
                Some(aggregator)
            }
        };

        Self {
            focus_gate: FocusGate::new(backend),
            executor,
            aggregator,
            broadcaster_only: dispatch.broadcaster_only,
            settle_delay,
        }
    }

    /// Фильтр событий чат-клиента: только PRIVMSG и, по политике, только от стримера
    pub fn on_chat_event(&self, event: &ChatEvent, app: &Application) {
        if !event.is_privmsg() {
            debug_if_enabled!("Пропуск события {}", event.command_type);
            return;
        }

        if self.broadcaster_only && !event.sender_is_broadcaster {
            info!("Игнорируем сообщение: {} (не стример)", event.text);
            return;
        }

        self.on_message(&event.text, app);
    }

    pub fn on_message(&self, raw_text: &str, app: &Application) {
        let trimmed = raw_text.trim();

        let Some(input) = app.find_input(trimmed) else {
            debug_if_enabled!("Сообщение '{}' не соответствует ни одному вводу", trimmed);
            return;
        };

        let is_long_variant = input.is_long_variant(trimmed);

        if !self.focus_gate.is_focused(app) {
            info!("Игнорируем сообщение: {} (приложение '{}' не в фокусе)", trimmed, app.name);
            return;
        }

        let request = InputRequest::new(trimmed, Arc::clone(input), is_long_variant);

        match &self.aggregator {
            Some(aggregator) => aggregator.submit(request),
            None => {
                info!("Прямой запуск: {}", request);
                self.executor.run(request.matched_input, request.is_long_variant);
            }
        }
    }

    /// Открыто ли сейчас окно приложения
    pub fn is_focused(&self, app: &Application) -> bool {
        self.focus_gate.is_focused(app)
    }

    /// Запустить ввод в обход сопоставления и агрегации.
    /// Фокус должен быть проверен вызывающим.
    pub fn run_input(&self, input: Arc<InputDefinition>, long_variant: bool) {
        self.executor.run(input, long_variant);
    }

    /// Дать разрешиться последней пачке и доиграть начатые действия
    pub async fn drain(&self) {
        sleep(self.settle_delay).await;
        self.executor.wait_idle().await;
    }

    /// Остановить действия с отпусканием удерживаемых вводов
    pub async fn shutdown(&self) {
        self.executor.stop_all().await;
    }
}
