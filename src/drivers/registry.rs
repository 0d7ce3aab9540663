//! Byte-Stream Drivers and the Driver Registry
//!
//! Drivers are registered once during initialization and live for the rest
//! of the program. Lookup is by path-like name ("/dev/tty").
//!
//! # Design
//! - Fixed-size table, no allocation
//! - Registration only; drivers are never removed
//! - Names are unique

use log::{debug, warn};
use spin::Mutex;

/// Maximum number of registered drivers.
pub const MAX_DRIVERS: usize = 8;

/// A named byte-stream device.
pub trait Driver: Sync {
    /// Name the driver is looked up by.
    fn name(&self) -> &str;

    /// One-time setup. Returns 0 on success.
    fn init(&self) -> i32;

    fn open(&self) -> i32;

    fn close(&self) -> i32;

    /// Read into `buf`; returns bytes read.
    fn read(&self, buf: &mut [u8]) -> usize;

    /// Write `buf`; returns bytes written.
    fn write(&self, buf: &[u8]) -> usize;

    /// Device-specific control request.
    fn control(&self, event: u16, input: &[u8], output: &mut [u8]) -> i32;
}

/// Registry errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// All slots are taken.
    Full,
    /// A driver with the same name is already registered.
    DuplicateName,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "driver registry full"),
            Self::DuplicateName => write!(f, "driver name already registered"),
        }
    }
}

/// Table of registered drivers.
pub struct DriverRegistry {
    slots: [Option<&'static dyn Driver>; MAX_DRIVERS],
    count: usize,
}

impl DriverRegistry {
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_DRIVERS],
            count: 0,
        }
    }

    /// Add a driver.
    ///
    /// Fails if the table is full or the name is taken.
    pub fn register(&mut self, driver: &'static dyn Driver) -> Result<(), RegistryError> {
        if self.find(driver.name()).is_some() {
            warn!("driver {} already registered", driver.name());
            return Err(RegistryError::DuplicateName);
        }
        if self.count == MAX_DRIVERS {
            warn!("no slot for driver {}", driver.name());
            return Err(RegistryError::Full);
        }
        self.slots[self.count] = Some(driver);
        self.count += 1;
        debug!("registered driver {}", driver.name());
        Ok(())
    }

    /// Look up a driver by name.
    pub fn find(&self, name: &str) -> Option<&'static dyn Driver> {
        self.slots[..self.count]
            .iter()
            .flatten()
            .copied()
            .find(|d| d.name() == name)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Registered drivers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Driver> + '_ {
        self.slots[..self.count].iter().flatten().copied()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide driver registry.
pub static DRIVERS: Mutex<DriverRegistry> = Mutex::new(DriverRegistry::new());
