//! semigate - ARM Semihosting for Bare-Metal Rust
//!
//! Lets firmware with no filesystem and no OS open, read, write and close
//! files on an attached debugger or simulator, print to its console, and
//! report program termination.
//!
//! # Layers
//! - `semihosting`: the call gateway (operation codes, argument blocks,
//!   trap instruction, raw −1-on-error calls)
//! - `hostfs`: `Result`-based host files with errno
//! - `drivers`: console, driver registry, "/dev/tty" monitor
//! - `logger`: `log` backend over the console
//! - `startup`: static-constructor runner
//! - `support`: unit-test lifecycle hooks
//!
//! # Targets
//! - AArch64 (`hlt #0xf000`)
//! - ARMv7-M/v8-M (`bkpt #0xab`)
//! - ARMv7-A/R (`svc #0x123456` in A32, `svc #0xab` in T32)
//! - RISC-V (`slli; ebreak; srai`)
//!
//! The target must have pointer-sized compare-and-swap: the console lock and
//! the logger registration both need it. ARMv6-M does not qualify.
//!
//! On other architectures only the host-agnostic parts are available, which
//! is how the unit tests run.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(all(
    any(target_arch = "arm", target_arch = "riscv32"),
    not(target_has_atomic = "ptr")
))]
compile_error!("semigate needs pointer-sized atomics (spin::Mutex, log::set_logger)");

pub mod drivers;
pub mod hostfs;
pub mod logger;
pub mod semihosting;
pub mod startup;
pub mod support;

#[cfg(test)]
mod testing;
