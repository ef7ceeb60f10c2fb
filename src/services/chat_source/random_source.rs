use crate::catalog::Application;
use crate::config::RandomConfig;
use crate::error::Result;
use crate::services::Dispatcher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use super::r#trait::ChatSourceTrait;

/// Случайный режим: пока окно приложения в фокусе, раз в `interval`
/// запускается случайный ввод со случайным вариантом (long/short).
/// Без фокуса источник ждёт, проверяя окно раз в `focus_poll`.
pub struct RandomChatSource<R = StdRng> {
    rng: R,
    interval: Duration,
    focus_poll: Duration,
}

impl RandomChatSource<StdRng> {
    pub fn from_config(config: &RandomConfig) -> Self {
        Self::new(StdRng::from_entropy(), config.interval(), config.focus_poll())
    }
}

impl<R: Rng + Send> RandomChatSource<R> {
    pub fn new(rng: R, interval: Duration, focus_poll: Duration) -> Self {
        Self {
            rng,
            interval,
            focus_poll,
        }
    }

    async fn run_impl(mut self, dispatcher: Arc<Dispatcher>, app: Arc<Application>) -> Result<()> {
        if app.inputs.is_empty() {
            warn!("У приложения '{}' нет вводов - случайный режим не запущен", app.name);
            return Ok(());
        }

        info!(
            "Случайный режим для '{}': ввод каждые {:?}",
            app.name, self.interval
        );

        loop {
            if !dispatcher.is_focused(&app) {
                info!("Приложение '{}' не в фокусе. Ждём фокус...", app.name);
                sleep(self.focus_poll).await;
                continue;
            }

            let input = &app.inputs[self.rng.gen_range(0..app.inputs.len())];
            let long_variant = self.rng.gen_bool(0.5);
            info!(
                "Случайный ввод: {} ({})",
                input.name,
                if long_variant { "long" } else { "short" }
            );
            dispatcher.run_input(Arc::clone(input), long_variant);

            sleep(self.interval).await;
        }
    }
}

#[async_trait::async_trait]
impl<R: Rng + Send + 'static> ChatSourceTrait for RandomChatSource<R> {
    async fn run(self: Box<Self>, dispatcher: Arc<Dispatcher>, app: Arc<Application>) -> Result<()> {
        (*self).run_impl(dispatcher, app).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InputDefinition;
    use crate::config::Config;
    use crate::events::KeyCode;
    use crate::services::backend::mock::{Call, MockBackend};
    use crate::services::executor::MotionSettings;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup(backend: &Arc<MockBackend>) -> (Arc<Dispatcher>, Arc<Application>) {
        let dispatcher = Arc::new(Dispatcher::new(
            backend.clone(),
            &Config::default().dispatch,
            MotionSettings::default(),
        ));
        let app = Arc::new(
            Application::new(
                "GB",
                vec!["mGBA".to_string()],
                vec![InputDefinition::key("A", "z", 100, 100).unwrap()],
            )
            .unwrap(),
        );
        (dispatcher, app)
    }

    fn source() -> Box<dyn ChatSourceTrait + Send> {
        Box::new(RandomChatSource::new(StdRng::seed_from_u64(7), ms(250), ms(1000)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_focus_then_fires_every_interval() {
        let backend = Arc::new(MockBackend::new());
        let (dispatcher, app) = setup(&backend);

        let handle = tokio::spawn(source().run(dispatcher, app));

        // Без окна только опрос заголовка раз в секунду
        sleep(ms(2500)).await;
        assert_eq!(
            backend.timed_calls(),
            vec![(ms(0), Call::Title), (ms(1000), Call::Title), (ms(2000), Call::Title)]
        );

        backend.set_title(Some("mGBA - pokemon.gb"));
        sleep(ms(1100)).await;
        handle.abort();

        let z = KeyCode(44);
        let presses: Vec<Duration> = backend
            .timed_calls()
            .into_iter()
            .filter(|(_, call)| *call == Call::KeyPress(z))
            .map(|(at, _)| at)
            .collect();
        assert_eq!(presses, vec![ms(3000), ms(3250), ms(3500)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_losing_focus_pauses_inputs() {
        let backend = Arc::new(MockBackend::new().with_title("mGBA"));
        let (dispatcher, app) = setup(&backend);

        let handle = tokio::spawn(source().run(dispatcher, app));

        sleep(ms(300)).await;
        backend.set_title(Some("Terminal"));
        sleep(ms(2000)).await;
        handle.abort();

        let presses = backend
            .injections()
            .into_iter()
            .filter(|call| matches!(call, Call::KeyPress(_)))
            .count();
        assert_eq!(presses, 2);
    }

    #[tokio::test]
    async fn test_application_without_inputs_returns() {
        let backend = Arc::new(MockBackend::new().with_title("Empty"));
        let dispatcher = Arc::new(Dispatcher::new(
            backend.clone(),
            &Config::default().dispatch,
            MotionSettings::default(),
        ));
        let app = Arc::new(Application::new("Empty", vec!["Empty".to_string()], Vec::new()).unwrap());

        source().run(dispatcher, app).await.unwrap();
        assert!(backend.calls().is_empty());
    }
}
