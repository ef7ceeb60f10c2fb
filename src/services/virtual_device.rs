use crate::chatter_error;
use crate::error::Result;
use parking_lot::Mutex;
use tracing::{debug, info};

const EV_KEY: i32 = 1;

/// Виртуальное uinput устройство с клавиатурными кодами и кнопками мыши
pub struct VirtualDevice {
    device: Mutex<uinput::Device>,
    device_name: String,
}

impl VirtualDevice {
    pub fn new(device_name: &str) -> Result<Self> {
        info!("Создание виртуального устройства uinput '{}' для инъекции клавиш", device_name);

        let device = uinput::default()?
            .name(device_name)?
            .event(uinput::event::Keyboard::All)?
            .event(uinput::event::Controller::All)?
            .create()
            .map_err(|e| chatter_error!(internal, "Не удалось создать виртуальное устройство '{}': {}", device_name, e))?;

        info!("Виртуальное устройство '{}' создано успешно", device_name);
        Ok(Self {
            device: Mutex::new(device),
            device_name: device_name.to_string(),
        })
    }

    pub fn press(&self, code: u16) -> Result<()> {
        self.write_key(code, 1)
    }

    pub fn release(&self, code: u16) -> Result<()> {
        self.write_key(code, 0)
    }

    fn write_key(&self, code: u16, value: i32) -> Result<()> {
        let mut device = self.device.lock();

        device
            .write(EV_KEY, code as i32, value)
            .map_err(|e| chatter_error!(backend, "Не удалось отправить событие клавиши {}: {}", code, e))?;

        // Синхронизируем события
        device
            .synchronize()
            .map_err(|e| chatter_error!(backend, "Не удалось синхронизировать события: {}", e))?;

        debug!("Событие клавиши {} = {} отправлено через '{}'", code, value, self.device_name);
        Ok(())
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        info!("Закрытие виртуального устройства '{}'", self.device_name);
    }
}
