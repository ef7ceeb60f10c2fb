use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod catalog;
mod config;
mod error;
mod events;
mod mappings;
mod services;
mod utils;

use catalog::Catalog;
use config::Config;
use services::{create_chat_source, create_input_backend, Dispatcher, MotionSettings};

#[derive(Parser, Debug)]
#[command(name = "chatter-rust")]
#[command(about = "Утилита для управления приложением командами из чата")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "chatter.toml")]
    config: String,

    /// Приложение: имя или номер в списке
    #[arg(short, long)]
    application: Option<String>,

    /// Показать список приложений и выйти
    #[arg(long)]
    list: bool,

    /// Случайные вводы вместо команд из чата
    #[arg(long)]
    random: bool,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let mut config = Config::load(&args.config)?;
    if args.random {
        config.random.enabled = true;
    }

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск Chatter Rust v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    let catalog = Catalog::load(&config)?;

    if args.list {
        println!("Поддерживаемые приложения:");
        for (i, app) in catalog.applications().iter().enumerate() {
            println!("{}. {}", i + 1, app.name);
        }
        return Ok(());
    }

    let selection = args
        .application
        .or_else(|| config.application.clone())
        .context("Приложение не выбрано: укажите --application или ключ application в конфигурации")?;
    let application = catalog.resolve(&selection)?;
    info!("Выбрано приложение: {}", application);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    } else if let Err(e) = utils::permissions::check_permissions() {
        error!("{}", e);
        for line in utils::permissions::get_setup_commands() {
            warn!("{}", line);
        }
        return Err(e.into());
    }

    // Инициализация компонентов
    let backend = create_input_backend(&config, &application, args.dry_run)?;
    let dispatcher = Arc::new(Dispatcher::new(
        backend,
        &config.dispatch,
        MotionSettings::from(&config.mouse),
    ));
    let chat_source = create_chat_source(&config.random);

    info!("Все компоненты инициализированы");

    let mut source_handle = tokio::spawn({
        let dispatcher = Arc::clone(&dispatcher);
        let application = Arc::clone(&application);
        async move {
            if let Err(e) = chat_source.run(dispatcher, application).await {
                error!("Ошибка в источнике команд: {}", e);
            }
        }
    });

    info!("Chatter запущен");

    // Ожидание сигнала завершения или конца потока команд
    tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
            }
            source_handle.abort();
        }
        _ = &mut source_handle => {
            info!("Поток команд закончился, ожидаем завершения действий");
            dispatcher.drain().await;
        }
    }

    info!("Завершение работы...");

    // Отпускаем всё, что ещё удерживается
    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    match tokio::time::timeout(shutdown_timeout, dispatcher.shutdown()).await {
        Ok(()) => info!("Все действия завершены корректно"),
        Err(_) => warn!("Таймаут при остановке действий"),
    }

    info!("Chatter Rust завершил работу");
    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);

    if format == "compact" {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    Ok(())
}
