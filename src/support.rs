//! Unit-Test Support Hooks
//!
//! Wires the semihosted monitor into the driver registry so on-target test
//! programs can print results, and reports the final status to the host.
//!
//! Lifecycle: `on_init` (register) → `on_start` (open) → `on_idle`* →
//! `on_exit(rc)`.

use log::{debug, info};

use crate::drivers::monitor::SemihostedMonitor;
use crate::drivers::registry::{Driver, DriverRegistry, RegistryError};
use crate::semihosting::Host;

/// Test-support hooks around one monitor instance.
pub struct Harness<H: 'static> {
    monitor: &'static SemihostedMonitor<H>,
}

impl<H: Host + Sync + 'static> Harness<H> {
    pub const fn new(monitor: &'static SemihostedMonitor<H>) -> Self {
        Self { monitor }
    }

    pub fn monitor(&self) -> &'static SemihostedMonitor<H> {
        self.monitor
    }

    /// Initialize the monitor and register it.
    pub fn on_init(&self, registry: &mut DriverRegistry) -> Result<(), RegistryError> {
        self.monitor.init();
        registry.register(self.monitor)?;
        info!("test monitor registered as {}", self.monitor.name());
        Ok(())
    }

    pub fn on_start(&self) {
        self.monitor.open();
        debug!("test monitor open");
    }

    pub fn on_idle(&self) {}

    /// Report the test program's exit status to the host.
    pub fn on_exit(&self, rc: i32) {
        info!("test run finished, rc = {}", rc);
        self.monitor.semihosting().exit_with_status(rc);
    }
}

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
mod global {
    use super::Harness;
    use crate::drivers::monitor::SemihostedMonitor;
    use crate::drivers::registry::{RegistryError, DRIVERS};
    use crate::semihosting::Breakpoint;

    static MONITOR: SemihostedMonitor<Breakpoint> = SemihostedMonitor::new(Breakpoint);
    static HARNESS: Harness<Breakpoint> = Harness::new(&MONITOR);

    /// Register "/dev/tty" in the process-wide registry.
    pub fn on_init() -> Result<(), RegistryError> {
        HARNESS.on_init(&mut DRIVERS.lock())
    }

    pub fn on_start() {
        HARNESS.on_start();
    }

    pub fn on_idle() {
        HARNESS.on_idle();
    }

    pub fn on_exit(rc: i32) {
        HARNESS.on_exit(rc);
    }
}

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
pub use global::{on_exit, on_idle, on_init, on_start};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semihosting::{ExceptionCode, OperationCode};
    use crate::testing::SimHost;

    fn harness() -> Harness<SimHost> {
        Harness::new(Box::leak(Box::new(SemihostedMonitor::new(SimHost::new()))))
    }

    #[test]
    fn test_init_registers_monitor() {
        let harness = harness();
        let mut registry = DriverRegistry::new();
        harness.on_init(&mut registry).unwrap();

        let tty = registry.find("/dev/tty").unwrap();
        assert_eq!(tty.write(b"ok"), 2);
        assert_eq!(harness.monitor().host().output(), b"ok");

        assert_eq!(
            harness.on_init(&mut registry),
            Err(RegistryError::DuplicateName)
        );
    }

    #[test]
    fn test_start_and_idle_do_not_trap() {
        let harness = harness();
        harness.on_start();
        harness.on_idle();
        assert_eq!(harness.monitor().host().trap_count(), 0);
    }

    #[test]
    fn test_exit_reports_application_exit() {
        let harness = harness();
        harness.on_exit(1);
        let trap = harness.monitor().host().last_trap().unwrap();
        assert_eq!(trap.op, OperationCode::ReportException);
        assert_eq!(
            trap.words,
            Some([ExceptionCode::ApplicationExit.code(), 1, 0])
        );
    }
}
