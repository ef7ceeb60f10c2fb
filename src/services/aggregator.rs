use crate::debug_if_enabled;
use crate::events::InputRequest;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{info, warn};

/// Сглаживает всплески одинаковых команд от множества зрителей.
///
/// Первая заявка в пустую пачку запускает одноразовый таймер на окно
/// дебаунса; последующие заявки просто добавляются в пачку и таймер не
/// сбрасывают. По таймеру пачка атомарно забирается под замком, и из неё
/// выбирается победитель. Заявка, пришедшая после этого, открывает новую
/// пачку. Победители уходят в канал, который читает Dispatcher.
pub struct Aggregator {
    window: Duration,
    batch: Arc<Mutex<Vec<InputRequest>>>,
    winners: mpsc::UnboundedSender<InputRequest>,
}

impl Aggregator {
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<InputRequest>) {
        let (winners, rx) = mpsc::unbounded_channel();
        let aggregator = Self {
            window,
            batch: Arc::new(Mutex::new(Vec::new())),
            winners,
        };
        (aggregator, rx)
    }

    pub fn submit(&self, request: InputRequest) {
        debug_if_enabled!("Заявка в пачку: {}", request);

        let opens_batch = {
            let mut batch = self.batch.lock();
            let was_empty = batch.is_empty();
            batch.push(request);
            was_empty
        };

        if opens_batch {
            self.schedule_resolution();
        }
    }

    fn schedule_resolution(&self) {
        let batch = Arc::clone(&self.batch);
        let winners = self.winners.clone();
        let window = self.window;

        tokio::spawn(async move {
            sleep(window).await;

            let requests = std::mem::take(&mut *batch.lock());

            match select_winner(&requests) {
                Some((winner, votes)) => {
                    info!(
                        "Победитель пачки из {} заявок: {} ({} голосов, ждал {:?})",
                        requests.len(),
                        winner,
                        votes,
                        winner.arrival_time.elapsed()
                    );
                    if winners.send(winner.clone()).is_err() {
                        warn!("Получатель победителей закрыт, {} отброшен", winner.matched_input.name);
                    }
                }
                None => debug_if_enabled!("Пачка пуста - действие не требуется"),
            }
        });
    }
}

/// Выбрать победителя пачки и число его голосов.
///
/// Голоса считаются по имени ввода в нижнем регистре. Побеждает имя со
/// строго наибольшим числом голосов, при равенстве - встреченное раньше.
/// Возвращается первая заявка пачки с этим именем: её вариант (long/short)
/// и определяет действие.
pub fn select_winner(batch: &[InputRequest]) -> Option<(&InputRequest, usize)> {
    // (имя, голоса, индекс первой заявки)
    let mut tally: SmallVec<[(String, usize, usize); 8]> = SmallVec::new();

    for (index, request) in batch.iter().enumerate() {
        let key = request.vote_key();
        match tally.iter_mut().find(|(name, _, _)| *name == key) {
            Some(entry) => entry.1 += 1,
            None => tally.push((key, 1, index)),
        }
    }

    let mut best: Option<&(String, usize, usize)> = None;
    for entry in &tally {
        if best.map_or(true, |current| entry.1 > current.1) {
            best = Some(entry);
        }
    }

    best.map(|(_, votes, first)| (&batch[*first], *votes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Application, InputDefinition};
    use tokio::time::Instant;

    fn app() -> Application {
        Application::new(
            "Emu",
            vec!["Emu".to_string()],
            vec![
                InputDefinition::key("UP", "up", 125, 1000).unwrap(),
                InputDefinition::key("DOWN", "down", 125, 1000).unwrap(),
                InputDefinition::key("A", "z", 125, 1000).unwrap(),
            ],
        )
        .unwrap()
    }

    fn request(app: &Application, text: &str) -> InputRequest {
        let input = app.find_input(text).unwrap();
        InputRequest::new(text, Arc::clone(input), input.is_long_variant(text))
    }

    #[test]
    fn test_majority_wins() {
        let app = app();
        let batch = vec![
            request(&app, "a"),
            request(&app, "up"),
            request(&app, "UP"),
            request(&app, "a"),
            request(&app, "Up"),
        ];
        let (winner, votes) = select_winner(&batch).unwrap();
        assert_eq!(winner.matched_input.name, "UP");
        assert_eq!(votes, 3);
        assert_eq!(winner.raw_text, "up");
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let app = app();
        let batch = vec![
            request(&app, "down"),
            request(&app, "up"),
            request(&app, "up"),
            request(&app, "DOWN"),
        ];
        let (winner, votes) = select_winner(&batch).unwrap();
        assert_eq!(winner.matched_input.name, "DOWN");
        assert_eq!(votes, 2);
        // Вариант берётся из первой заявки с этим именем
        assert!(!winner.is_long_variant);
    }

    #[test]
    fn test_empty_batch_has_no_winner() {
        assert!(select_winner(&[]).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_resolves_once_after_window() {
        let app = app();
        let (aggregator, mut winners) = Aggregator::new(Duration::from_millis(200));
        let start = Instant::now();

        aggregator.submit(request(&app, "up"));
        aggregator.submit(request(&app, "UP"));
        aggregator.submit(request(&app, "up"));

        let winner = winners.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(200));
        assert_eq!(winner.matched_input.name, "UP");
        assert_eq!(winner.raw_text, "up");
        assert!(!winner.is_long_variant);

        sleep(Duration::from_secs(1)).await;
        assert!(winners.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_submission_does_not_reset_timer() {
        let app = app();
        let (aggregator, mut winners) = Aggregator::new(Duration::from_millis(200));
        let start = Instant::now();

        aggregator.submit(request(&app, "a"));
        sleep(Duration::from_millis(150)).await;
        aggregator.submit(request(&app, "down"));
        aggregator.submit(request(&app, "down"));

        let winner = winners.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(200));
        assert_eq!(winner.matched_input.name, "DOWN");
        assert_eq!(winner.arrival_time.elapsed(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_after_resolution_opens_new_batch() {
        let app = app();
        let (aggregator, mut winners) = Aggregator::new(Duration::from_millis(200));
        let start = Instant::now();

        aggregator.submit(request(&app, "up"));
        assert_eq!(winners.recv().await.unwrap().matched_input.name, "UP");

        sleep(Duration::from_millis(50)).await;
        aggregator.submit(request(&app, "A"));

        let second = winners.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(450));
        assert_eq!(second.matched_input.name, "A");
        assert!(second.is_long_variant);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_request_wins_alone() {
        let app = app();
        let (aggregator, mut winners) = Aggregator::new(Duration::from_millis(200));

        aggregator.submit(request(&app, "DOWN"));

        let winner = winners.recv().await.unwrap();
        assert_eq!(winner.matched_input.name, "DOWN");
        assert_eq!(winner.raw_text, "DOWN");
        assert!(winner.is_long_variant);
    }
}
