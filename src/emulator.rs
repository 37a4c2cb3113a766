//! The CHIP-8 virtual machine and the pieces it is built from.

pub mod config;
pub mod display;
pub mod emulator;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod stack;
pub mod timer;

pub use self::config::{Config, Quirks};
pub use self::display::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use self::emulator::{Anomaly, Emulator, RegisterSnapshot, RunSummary, Step};
pub use self::error::EmulatorError;
