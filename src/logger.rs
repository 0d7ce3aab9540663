//! `log` backend that prints to the semihosted console.
//!
//! Records are written as `[LEVEL] target: message` lines. The semihosting
//! gateway itself never logs, so a record can never re-enter the logger.

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

use crate::drivers::console::HostConsole;
use crate::semihosting::Host;

/// Logger writing through a shared console.
pub struct HostLogger<H: 'static> {
    console: &'static Mutex<HostConsole<H>>,
    level: LevelFilter,
}

impl<H: Host + 'static> HostLogger<H> {
    pub const fn new(console: &'static Mutex<HostConsole<H>>, level: LevelFilter) -> Self {
        Self { console, level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl<H: Host + Send + 'static> Log for HostLogger<H> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut console = self.console.lock();
        let _ = writeln!(
            console,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
mod global {
    use log::{LevelFilter, SetLoggerError};
    use spin::Once;

    use super::HostLogger;
    use crate::drivers::console::CONSOLE;
    use crate::semihosting::Breakpoint;

    static LOGGER: Once<HostLogger<Breakpoint>> = Once::new();

    /// Enable the console and install the semihosting logger.
    ///
    /// Call only with a debugger attached. Fails if another logger is
    /// already installed.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        CONSOLE.lock().enable();
        let logger = LOGGER.call_once(|| HostLogger::new(&CONSOLE, level));
        log::set_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }
}

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
pub use global::init;
