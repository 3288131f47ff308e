//! Virtual keyboard backed by `/dev/uinput`.

use crate::error::{PalmpadError, Result};
use crate::keys::injector::{DirectionKey, KeyInjector};
use evdev::{uinput::VirtualDevice, AttributeSet, EventType, InputEvent, KeyCode};

/// Name the virtual device registers under.
pub const DEVICE_NAME: &str = "palmpad virtual keyboard";

const KEY_UP_VALUE: i32 = 0;
const KEY_DOWN_VALUE: i32 = 1;

fn key_code(key: DirectionKey) -> KeyCode {
    match key {
        DirectionKey::Left => KeyCode::KEY_LEFT,
        DirectionKey::Right => KeyCode::KEY_RIGHT,
        DirectionKey::Up => KeyCode::KEY_UP,
        DirectionKey::Down => KeyCode::KEY_DOWN,
    }
}

/// Arrow-key keyboard created through uinput.
///
/// The device disappears when this value is dropped.
pub struct UinputKeyboard {
    device: VirtualDevice,
}

impl UinputKeyboard {
    /// Register a virtual keyboard exposing the four arrow keys.
    pub fn create() -> Result<Self> {
        let mut keys = AttributeSet::<KeyCode>::new();
        for key in DirectionKey::ALL {
            keys.insert(key_code(key));
        }

        let device = VirtualDevice::builder()
            .map_err(|e| PalmpadError::key_injection("failed to open /dev/uinput", e))?
            .name(DEVICE_NAME)
            .with_keys(&keys)
            .map_err(|e| PalmpadError::key_injection("failed to register arrow keys", e))?
            .build()
            .map_err(|e| PalmpadError::key_injection("failed to create virtual keyboard", e))?;

        log::info!("created uinput device '{}'", DEVICE_NAME);
        Ok(Self { device })
    }

    fn emit(&mut self, key: DirectionKey, value: i32) -> Result<()> {
        let event = InputEvent::new(EventType::KEY.0, key_code(key).0, value);
        // emit appends the SYN_REPORT
        self.device
            .emit(&[event])
            .map_err(|e| PalmpadError::key_injection(format!("failed to send {}", key), e))
    }
}

impl KeyInjector for UinputKeyboard {
    fn press(&mut self, key: DirectionKey) -> Result<()> {
        log::debug!("uinput press {}", key);
        self.emit(key, KEY_DOWN_VALUE)
    }

    fn release(&mut self, key: DirectionKey) -> Result<()> {
        log::debug!("uinput release {}", key);
        self.emit(key, KEY_UP_VALUE)
    }
}
