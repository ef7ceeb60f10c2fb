use crate::chatter_error;
use crate::error::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tracing::{info, warn};

/// Проверить доступ к ресурсам, нужным бэкенду инъекции ввода
pub fn check_permissions() -> Result<()> {
    info!("Проверка прав доступа...");

    // Проверка доступа к /dev/uinput
    check_uinput_access()?;

    // xdotool работает только с X-сервером
    check_display();

    // Проверка, что не запущен от root (рекомендация безопасности)
    check_not_root();

    info!("Проверка прав доступа завершена успешно");
    Ok(())
}

fn check_uinput_access() -> Result<()> {
    let uinput_device = "/dev/uinput";

    if !std::path::Path::new(uinput_device).exists() {
        return Err(chatter_error!(
            permission,
            "{} не существует, возможно модуль uinput не загружен",
            uinput_device
        ));
    }

    let metadata = fs::metadata(uinput_device).map_err(|e| {
        chatter_error!(permission, "Не удалось проверить права доступа к {}: {}", uinput_device, e)
    })?;

    // Проверяем права доступа (обычно 660 или 666)
    let mode = metadata.permissions().mode();
    if mode & 0o006 == 0 && mode & 0o060 == 0 {
        return Err(chatter_error!(
            permission,
            "Нет прав доступа к {}. Добавьте пользователя в группу 'uinput' или 'input'",
            uinput_device
        ));
    }

    info!("Доступ к {} подтвержден", uinput_device);
    Ok(())
}

fn check_display() -> bool {
    match std::env::var("DISPLAY") {
        Ok(value) if !value.is_empty() => {
            info!("X-дисплей: {}", value);
            true
        }
        _ => {
            warn!("Переменная DISPLAY не задана - xdotool не сможет определить активное окно");
            false
        }
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Рекомендуется добавить пользователя в группу 'input'");
            warn!("   и запускать приложение от имени обычного пользователя");
        }
        Ok(user) => {
            info!("Приложение запущено от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}

/// Получить рекомендуемые команды для настройки прав доступа
pub fn get_setup_commands() -> Vec<String> {
    vec![
        "# Добавить пользователя в необходимые группы:".to_string(),
        "sudo usermod -a -G input $USER".to_string(),
        "".to_string(),
        "# Загрузить модуль uinput:".to_string(),
        "sudo modprobe uinput".to_string(),
        "".to_string(),
        "# Установить xdotool:".to_string(),
        "sudo apt install xdotool".to_string(),
        "".to_string(),
        "# После выполнения команд перезайдите в систему".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_commands() {
        let commands = get_setup_commands();
        assert!(!commands.is_empty());
        assert!(commands.iter().any(|cmd| cmd.contains("usermod")));
        assert!(commands.iter().any(|cmd| cmd.contains("modprobe")));
        assert!(commands.iter().any(|cmd| cmd.contains("xdotool")));
    }

    #[test]
    fn test_check_display_reads_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DISPLAY", ":0");
            assert!(check_display());

            jail.set_env("DISPLAY", "");
            assert!(!check_display());
            Ok(())
        });
    }
}
