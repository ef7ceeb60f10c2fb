use crate::catalog::{DeviceClass, InputCode, InputDefinition, InputKind};
use crate::config::MouseConfig;
use crate::debug_if_enabled;
use crate::events::Direction;
use crate::services::backend::InputBackendTrait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Параметры движения курсора для вводов класса MouseAxis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSettings {
    pub tick: Duration,
    pub step: i32,
    pub edge_buffer: i32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(25),
            step: 10,
            edge_buffer: 10,
        }
    }
}

impl From<&MouseConfig> for MotionSettings {
    fn from(config: &MouseConfig) -> Self {
        Self {
            tick: config.tick(),
            step: config.step_px,
            edge_buffer: config.edge_buffer_px,
        }
    }
}

/// Текущее действие класса устройства
struct ActiveAction {
    input: String,
    cancel: CancellationToken,
    /// Отменяется, когда задача действия полностью завершилась (включая release)
    finished: CancellationToken,
}

/// Исполняет действия против бэкенда.
///
/// Для каждого класса устройства есть не более одного действия. Новое
/// действие того же класса отменяет предыдущее под замком слота, а его
/// задача ждёт, пока предыдущая закончит очистку, и только потом нажимает.
/// Поэтому удерживаемых вводов на класс никогда не больше одного.
pub struct Executor {
    backend: Arc<dyn InputBackendTrait>,
    motion: MotionSettings,
    key_slot: Mutex<Option<ActiveAction>>,
    axis_slot: Mutex<Option<ActiveAction>>,
}

impl Executor {
    pub fn new(backend: Arc<dyn InputBackendTrait>, motion: MotionSettings) -> Self {
        info!("Инициализация Executor ({:?})", motion);
        Self {
            backend,
            motion,
            key_slot: Mutex::new(None),
            axis_slot: Mutex::new(None),
        }
    }

    fn slot(&self, class: DeviceClass) -> &Mutex<Option<ActiveAction>> {
        match class {
            DeviceClass::Key => &self.key_slot,
            DeviceClass::MouseAxis => &self.axis_slot,
        }
    }

    /// Запустить действие, вытеснив текущее действие того же класса.
    ///
    /// К возврату отмена предыдущего действия уже выставлена; его очистка
    /// может закончиться позже, но новое действие нажмёт только после неё.
    pub fn run(&self, input: Arc<InputDefinition>, long_variant: bool) -> JoinHandle<()> {
        let class = input.device_class();
        let cancel = CancellationToken::new();
        let finished = CancellationToken::new();

        let mut slot = self.slot(class).lock();

        let previous = slot.take().map(|prev| {
            if !prev.finished.is_cancelled() {
                info!("Вытеснение {} действием {} (класс {})", prev.input, input.name, class);
            }
            prev.cancel.cancel();
            prev.finished
        });

        *slot = Some(ActiveAction {
            input: input.name.clone(),
            cancel: cancel.clone(),
            finished: finished.clone(),
        });

        // Guard живёт в самой задаче: срабатывает и когда задачу сняли до первого poll
        let finished = finished.drop_guard();
        let backend = Arc::clone(&self.backend);
        let motion = self.motion;
        let handle = tokio::spawn(async move {
            let _finished = finished;
            perform(backend, motion, input, long_variant, cancel, previous).await;
        });

        drop(slot);
        handle
    }

    /// Есть ли незавершённое действие данного класса
    #[cfg(test)]
    pub fn is_busy(&self, class: DeviceClass) -> bool {
        self.slot(class)
            .lock()
            .as_ref()
            .is_some_and(|action| !action.finished.is_cancelled())
    }

    /// Дождаться естественного завершения текущих действий
    pub async fn wait_idle(&self) {
        let pending: Vec<CancellationToken> = [&self.key_slot, &self.axis_slot]
            .into_iter()
            .filter_map(|slot| slot.lock().as_ref().map(|action| action.finished.clone()))
            .collect();

        for finished in pending {
            finished.cancelled().await;
        }
    }

    /// Отменить все действия и дождаться их очистки
    pub async fn stop_all(&self) {
        let actions: Vec<ActiveAction> = [&self.key_slot, &self.axis_slot]
            .into_iter()
            .filter_map(|slot| slot.lock().take())
            .collect();

        for action in &actions {
            if !action.finished.is_cancelled() {
                info!("Остановка действия {}", action.input);
            }
            action.cancel.cancel();
        }

        for action in actions {
            action.finished.cancelled().await;
        }
    }
}

async fn perform(
    backend: Arc<dyn InputBackendTrait>,
    motion: MotionSettings,
    input: Arc<InputDefinition>,
    long_variant: bool,
    cancel: CancellationToken,
    previous: Option<CancellationToken>,
) {
    if let Some(previous) = previous {
        previous.cancelled().await;
    }

    if cancel.is_cancelled() {
        debug_if_enabled!("Действие {} отменено до начала", input.name);
        return;
    }

    let duration = input.duration(long_variant);
    match input.kind {
        InputKind::Key(code) => {
            info!("Удержание {} ({}) на {:?}", input.name, code, duration);
            hold(backend.as_ref(), code, duration, &cancel).await;
        }
        InputKind::MouseAxis(direction) => {
            info!("Движение мыши {} ({}) на {:?}", input.name, direction, duration);
            nudge(backend.as_ref(), motion, direction, duration, &cancel).await;
        }
    }
}

/// Нажатый ввод. Отпускается ровно один раз: явно или при drop.
struct HeldInput<'a> {
    backend: &'a dyn InputBackendTrait,
    code: InputCode,
    released: bool,
}

impl<'a> HeldInput<'a> {
    fn new(backend: &'a dyn InputBackendTrait, code: InputCode) -> Self {
        Self {
            backend,
            code,
            released: false,
        }
    }

    fn press(&self) -> crate::error::Result<()> {
        match self.code {
            InputCode::Key(key) => self.backend.key_press(key),
            InputCode::Button(button) => self.backend.mouse_button_press(button),
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let result = match self.code {
            InputCode::Key(key) => self.backend.key_release(key),
            InputCode::Button(button) => self.backend.mouse_button_release(button),
        };

        if let Err(e) = result {
            error!("Не удалось отпустить {}: {}", self.code, e);
        }
    }
}

impl Drop for HeldInput<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

async fn hold(backend: &dyn InputBackendTrait, code: InputCode, duration: Duration, cancel: &CancellationToken) {
    // Guard создаётся до нажатия: при сбое press release всё равно будет попытка
    let mut held = HeldInput::new(backend, code);

    if let Err(e) = held.press() {
        error!("Не удалось нажать {}: {}", code, e);
        return;
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug_if_enabled!("Удержание {} прервано", code);
        }
        _ = sleep(duration) => {}
    }

    held.release();
}

async fn nudge(
    backend: &dyn InputBackendTrait,
    motion: MotionSettings,
    direction: Direction,
    duration: Duration,
    cancel: &CancellationToken,
) {
    let Some(rect) = backend.window_rect() else {
        info!("Прямоугольник окна недоступен - движение мыши {} пропущено", direction);
        return;
    };
    let bounds = rect.inset(motion.edge_buffer);

    let (mut x, mut y) = match backend.cursor_position() {
        Ok(position) => position,
        Err(e) => {
            error!("Не удалось получить позицию курсора: {}", e);
            return;
        }
    };

    let (dx, dy) = direction.delta(motion.step);

    let deadline = sleep_until(Instant::now() + duration);
    tokio::pin!(deadline);

    let mut ticker = interval(motion.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug_if_enabled!("Движение мыши {} прервано на ({}, {})", direction, x, y);
                break;
            }
            _ = &mut deadline => break,
            _ = ticker.tick() => {
                (x, y) = bounds.clamp(x.saturating_add(dx), y.saturating_add(dy));
                if let Err(e) = backend.move_cursor_to(x, y) {
                    warn!("Не удалось сдвинуть курсор в ({}, {}): {}", x, y, e);
                    break;
                }
            }
        }
    }
}
