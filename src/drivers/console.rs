//! Semihosted Debug Console
//!
//! Formatted text output to the host's stdout (descriptor 1).
//!
//! Output is dropped until [`HostConsole::enable`] is called: without an
//! attached debugger the trap instruction faults or halts the core, so
//! firmware must opt in once it knows a host is present.

use core::fmt::{self, Write};

use crate::semihosting::{Descriptor, Host, Semihosting};

/// Host descriptor for the console's output stream.
pub const STDOUT: Descriptor = 1;

/// Console writer over a semihosting host.
#[derive(Debug)]
pub struct HostConsole<H> {
    host: Semihosting<H>,
    enabled: bool,
}

impl<H: Host> HostConsole<H> {
    /// Create a console (not yet enabled).
    pub const fn new(host: H) -> Self {
        Self {
            host: Semihosting::new(host),
            enabled: false,
        }
    }

    /// Start forwarding output to the host.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn host(&self) -> &H {
        self.host.host()
    }

    /// Write raw bytes to the host console.
    pub fn write_bytes(&self, bytes: &[u8]) {
        if !self.enabled {
            return;
        }
        self.host.write(STDOUT, bytes);
    }
}

impl<H: Host> Write for HostConsole<H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// Global console instance protected by spinlock
#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
pub static CONSOLE: spin::Mutex<HostConsole<crate::semihosting::Breakpoint>> =
    spin::Mutex::new(HostConsole::new(crate::semihosting::Breakpoint));

/// Print to the host console
#[macro_export]
macro_rules! hprint {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut console = $crate::drivers::console::CONSOLE.lock();
        let _ = write!(console, $($arg)*);
    }};
}

/// Print a line to the host console
#[macro_export]
macro_rules! hprintln {
    () => {
        $crate::hprint!("\n")
    };
    ($($arg:tt)*) => {{
        $crate::hprint!($($arg)*);
        $crate::hprint!("\n");
    }};
}
