//! Keys subsystem.
//!
//! Turns a stream of requested directional keys into press/release calls on a
//! [`KeyInjector`], keeping at most one key held.

pub mod driver;
pub mod injector;
#[cfg(target_os = "linux")]
pub mod uinput;

pub use driver::KeyDriver;
pub use injector::{DirectionKey, DryRunInjector, KeyEvent, KeyInjector};
#[cfg(target_os = "linux")]
pub use uinput::UinputKeyboard;
