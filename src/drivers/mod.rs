//! Device drivers layered on semihosting
//!
//! - `console`: formatted debug output (`hprint!`/`hprintln!`)
//! - `registry`: the `Driver` trait and the process-wide driver table
//! - `monitor`: the "/dev/tty" byte-stream driver

pub mod console;
pub mod monitor;
pub mod registry;

pub use console::HostConsole;
pub use monitor::{SemihostedMonitor, MONITOR_NAME};
pub use registry::{Driver, DriverRegistry, RegistryError, DRIVERS, MAX_DRIVERS};
