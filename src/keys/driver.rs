//! Idempotent key driver.

use crate::error::Result;
use crate::keys::injector::{DirectionKey, KeyInjector};

/// Holds at most one key down on an injector.
///
/// `current_key` always mirrors what the injector has been told is held. Dropping the driver
/// releases any held key, so the key cannot stay stuck when the frame loop exits through an
/// error, a panic or a cancelled future.
pub struct KeyDriver<I: KeyInjector> {
    injector: I,
    current_key: Option<DirectionKey>,
}

impl<I: KeyInjector> KeyDriver<I> {
    pub fn new(injector: I) -> Self {
        Self {
            injector,
            current_key: None,
        }
    }

    /// Request `requested` to be the only held key (`None` releases everything).
    ///
    /// Repeating the current request is a no-op. If the release of the previous key fails it
    /// is still considered held; if the press of the new key fails nothing is held.
    pub fn set_state(&mut self, requested: Option<DirectionKey>) -> Result<()> {
        if requested == self.current_key {
            return Ok(());
        }

        if let Some(held) = self.current_key {
            self.injector.release(held)?;
            self.current_key = None;
        }

        if let Some(key) = requested {
            self.injector.press(key)?;
            self.current_key = Some(key);
        }

        Ok(())
    }

    /// Release the held key, if any.
    pub fn release_all(&mut self) -> Result<()> {
        self.set_state(None)
    }

    pub fn current_key(&self) -> Option<DirectionKey> {
        self.current_key
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }
}

impl<I: KeyInjector> Drop for KeyDriver<I> {
    fn drop(&mut self) {
        if let Some(key) = self.current_key.take() {
            if let Err(err) = self.injector.release(key) {
                log::warn!("failed to release {} on shutdown: {}", key, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PalmpadError;
    use crate::keys::injector::{DryRunInjector, KeyEvent};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_repeated_request_presses_once() {
        let mut driver = KeyDriver::new(DryRunInjector::new());
        driver.set_state(Some(DirectionKey::Left)).unwrap();
        driver.set_state(Some(DirectionKey::Left)).unwrap();

        assert_eq!(
            driver.injector().events(),
            &[KeyEvent::Press(DirectionKey::Left)]
        );
        assert_eq!(driver.current_key(), Some(DirectionKey::Left));
    }

    #[test]
    fn test_switch_releases_then_presses() {
        let mut driver = KeyDriver::new(DryRunInjector::new());
        driver.set_state(Some(DirectionKey::Up)).unwrap();
        driver.set_state(Some(DirectionKey::Down)).unwrap();

        assert_eq!(
            driver.injector().events(),
            &[
                KeyEvent::Press(DirectionKey::Up),
                KeyEvent::Release(DirectionKey::Up),
                KeyEvent::Press(DirectionKey::Down),
            ]
        );
    }

    #[test]
    fn test_neutral_releases_without_press() {
        let mut driver = KeyDriver::new(DryRunInjector::new());
        driver.set_state(Some(DirectionKey::Right)).unwrap();
        driver.set_state(None).unwrap();

        assert_eq!(
            driver.injector().events(),
            &[
                KeyEvent::Press(DirectionKey::Right),
                KeyEvent::Release(DirectionKey::Right),
            ]
        );
        assert_eq!(driver.current_key(), None);
    }

    #[test]
    fn test_neutral_from_idle_is_noop() {
        let mut driver = KeyDriver::new(DryRunInjector::new());
        driver.set_state(None).unwrap();
        driver.release_all().unwrap();
        assert!(driver.injector().events().is_empty());
    }

    /// Shares its log with the test so events survive the driver being dropped.
    #[derive(Clone, Default)]
    struct SharedInjector {
        log: Rc<RefCell<Vec<KeyEvent>>>,
        fail_press: bool,
        fail_release: bool,
    }

    impl KeyInjector for SharedInjector {
        fn press(&mut self, key: DirectionKey) -> Result<()> {
            if self.fail_press {
                return Err(PalmpadError::key_injection(
                    "press rejected",
                    std::io::Error::new(std::io::ErrorKind::Other, "device busy"),
                ));
            }
            self.log.borrow_mut().push(KeyEvent::Press(key));
            Ok(())
        }

        fn release(&mut self, key: DirectionKey) -> Result<()> {
            if self.fail_release {
                return Err(PalmpadError::key_injection(
                    "release rejected",
                    std::io::Error::new(std::io::ErrorKind::Other, "device busy"),
                ));
            }
            self.log.borrow_mut().push(KeyEvent::Release(key));
            Ok(())
        }
    }

    #[test]
    fn test_drop_releases_held_key() {
        let injector = SharedInjector::default();
        let log = Rc::clone(&injector.log);
        {
            let mut driver = KeyDriver::new(injector);
            driver.set_state(Some(DirectionKey::Up)).unwrap();
        }

        assert_eq!(
            *log.borrow(),
            vec![
                KeyEvent::Press(DirectionKey::Up),
                KeyEvent::Release(DirectionKey::Up),
            ]
        );
    }

    #[test]
    fn test_drop_after_release_all_does_not_release_twice() {
        let injector = SharedInjector::default();
        let log = Rc::clone(&injector.log);
        {
            let mut driver = KeyDriver::new(injector);
            driver.set_state(Some(DirectionKey::Left)).unwrap();
            driver.release_all().unwrap();
        }

        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_drop_releases_on_panic_unwind() {
        let injector = SharedInjector::default();
        let log = Rc::clone(&injector.log);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let mut driver = KeyDriver::new(injector);
            driver.set_state(Some(DirectionKey::Down)).unwrap();
            panic!("frame loop blew up");
        }));

        assert!(result.is_err());
        assert_eq!(
            log.borrow().last(),
            Some(&KeyEvent::Release(DirectionKey::Down))
        );
    }

    #[test]
    fn test_failed_press_leaves_nothing_held() {
        let mut driver = KeyDriver::new(SharedInjector {
            fail_press: true,
            ..SharedInjector::default()
        });

        assert!(driver.set_state(Some(DirectionKey::Left)).is_err());
        assert_eq!(driver.current_key(), None);
    }

    #[test]
    fn test_failed_release_keeps_key_held() {
        let mut driver = KeyDriver::new(SharedInjector::default());
        driver.set_state(Some(DirectionKey::Right)).unwrap();
        driver.injector.fail_release = true;

        assert!(driver.set_state(Some(DirectionKey::Up)).is_err());
        assert_eq!(driver.current_key(), Some(DirectionKey::Right));

        // Let the Drop guard succeed
        driver.injector.fail_release = false;
    }

    fn request() -> impl Strategy<Value = Option<DirectionKey>> {
        prop::option::of(prop_oneof![
            Just(DirectionKey::Left),
            Just(DirectionKey::Right),
            Just(DirectionKey::Up),
            Just(DirectionKey::Down),
        ])
    }

    proptest! {
        #[test]
        fn at_most_one_key_is_ever_held(requests in prop::collection::vec(request(), 0..64)) {
            let mut driver = KeyDriver::new(DryRunInjector::new());
            for requested in &requests {
                driver.set_state(*requested).unwrap();
            }

            let expected = requests.last().copied().flatten();
            prop_assert_eq!(driver.current_key(), expected);

            for key in DirectionKey::ALL {
                let net = driver.injector().net_presses(key);
                if Some(key) == expected {
                    prop_assert_eq!(net, 1);
                } else {
                    prop_assert_eq!(net, 0);
                }
            }

            // Replay the log: never two keys down, never a release of an idle key
            let mut held: Option<DirectionKey> = None;
            for event in driver.injector().events() {
                match *event {
                    KeyEvent::Press(key) => {
                        prop_assert!(held.is_none());
                        held = Some(key);
                    }
                    KeyEvent::Release(key) => {
                        prop_assert_eq!(held, Some(key));
                        held = None;
                    }
                }
            }
        }
    }
}
