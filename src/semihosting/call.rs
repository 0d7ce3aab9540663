//! Semihosting Call Surface
//!
//! Typed entry points: marshal the arguments into a stack-local block, trap,
//! hand back the host's result register unchanged.
//!
//! # Result Convention
//! Every call returns the raw result register sign-extended to `i64`. The
//! host signals failure with −1; nothing here retries or translates it.
//! Richer errors live in [`crate::hostfs`].

use core::ffi::CStr;

use super::block::{Arguments, Descriptor};
use super::mode::FileOpenMode;
use super::opcode::{ExceptionCode, OperationCode};
use super::trap::{ExitConvention, Host};

/// Host result meaning "failed".
pub const HOST_ERROR: i64 = -1;

/// Semihosting calls bound to one [`Host`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Semihosting<H> {
    host: H,
    exit: ExitConvention,
}

impl<H: Host> Semihosting<H> {
    pub const fn new(host: H) -> Self {
        Self::with_exit_convention(host, ExitConvention::NATIVE)
    }

    /// Bind to `host`, overriding how termination is reported.
    pub const fn with_exit_convention(host: H, exit: ExitConvention) -> Self {
        Self { host, exit }
    }

    pub fn exit_convention(&self) -> ExitConvention {
        self.exit
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Marshal, trap, and scrub. The block lives on this frame only.
    fn call(&self, mut args: Arguments<'_>) -> i64 {
        let op = args.operation();
        let mut block = args.marshal();
        // SAFETY: `block` was produced by `marshal` for `op`; the buffers it
        // points at are borrowed by `args`, which outlives the trap.
        let result = unsafe { self.host.trap(op, block.address()) };
        drop(block);
        result as isize as i64
    }

    /// Trap for operations that take no parameter.
    fn call_bare(&self, op: OperationCode) -> i64 {
        // SAFETY: parameterless operation, zero data register.
        unsafe { self.host.trap(op, 0) as isize as i64 }
    }

    /// Open `name` on the host. Returns a descriptor or −1.
    pub fn open(&self, name: &CStr, mode: FileOpenMode) -> Descriptor {
        self.call(Arguments::Open { name, mode })
    }

    /// Close a descriptor. Returns 0 or −1.
    pub fn close(&self, fd: Descriptor) -> i64 {
        self.call(Arguments::Close { fd })
    }

    /// Read up to `buf.len()` bytes. Returns the host result, or −1.
    ///
    /// An empty buffer returns 0 without trapping.
    pub fn read(&self, fd: Descriptor, buf: &mut [u8]) -> i64 {
        if buf.is_empty() {
            return 0;
        }
        self.call(Arguments::Read { fd, buf })
    }

    /// Write `buf`. Returns the host result, or −1.
    ///
    /// An empty buffer returns 0 without trapping.
    pub fn write(&self, fd: Descriptor, buf: &[u8]) -> i64 {
        if buf.is_empty() {
            return 0;
        }
        self.call(Arguments::Write { fd, buf })
    }

    /// Report termination with `reason`.
    ///
    /// On 64-bit targets the reason is the only block word; on 32-bit
    /// targets it goes in the parameter register itself. Normally the host
    /// ends the session; if it resumes the target this returns.
    pub fn exit(&self, reason: usize) {
        match self.exit {
            ExitConvention::Block => {
                self.call(Arguments::Exit { reason });
            }
            // SAFETY: 32-bit ReportException reads no memory; the reason is
            // the parameter.
            ExitConvention::Register => unsafe {
                self.host.trap(OperationCode::ReportException, reason);
            },
        }
    }

    /// Report `exception` with a subcode (exit status for ApplicationExit).
    ///
    /// 32-bit hosts only see a subcode through ExitExtended.
    pub fn report_exception(&self, exception: ExceptionCode, subcode: usize) {
        match self.exit {
            ExitConvention::Block => {
                self.call(Arguments::ReportException { exception, subcode });
            }
            ExitConvention::Register => {
                self.call(Arguments::ExitExtended { exception, subcode });
            }
        }
    }

    /// Terminate the session with an exit status.
    pub fn exit_with_status(&self, status: i32) {
        self.report_exception(ExceptionCode::ApplicationExit, status as isize as usize);
    }

    /// Write one character to the debug console.
    pub fn write_char(&self, c: u8) {
        // SAFETY: WriteC takes the address of a single byte, live for the call.
        unsafe {
            self.host.trap(OperationCode::WriteC, &c as *const u8 as usize);
        }
    }

    /// Write a NUL-terminated string to the debug console.
    pub fn write_str0(&self, s: &CStr) {
        // SAFETY: Write0 takes the address of a NUL-terminated string.
        unsafe {
            self.host.trap(OperationCode::Write0, s.as_ptr() as usize);
        }
    }

    /// Blocking read of one console character.
    pub fn read_char(&self) -> i64 {
        self.call_bare(OperationCode::ReadC)
    }

    /// 1 if `fd` is interactive, 0 if not, −1 on error.
    pub fn is_tty(&self, fd: Descriptor) -> i64 {
        self.call(Arguments::IsTty { fd })
    }

    /// Seek to an absolute position. Returns 0 or a negative value.
    pub fn seek(&self, fd: Descriptor, position: usize) -> i64 {
        self.call(Arguments::Seek { fd, position })
    }

    /// Length of the file, or −1.
    pub fn flen(&self, fd: Descriptor) -> i64 {
        self.call(Arguments::FLen { fd })
    }

    /// Delete a host file. Returns 0 or the host's error code.
    pub fn remove(&self, name: &CStr) -> i64 {
        self.call(Arguments::Remove { name })
    }

    /// Centiseconds since the target started, or −1.
    pub fn clock(&self) -> i64 {
        self.call_bare(OperationCode::Clock)
    }

    /// Seconds since the Unix epoch.
    pub fn time(&self) -> i64 {
        self.call_bare(OperationCode::Time)
    }

    /// Host errno from the last failed call.
    pub fn errno(&self) -> i64 {
        self.call_bare(OperationCode::Errno)
    }
}

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
mod direct {
    use core::ffi::CStr;

    use super::Semihosting;
    use crate::semihosting::block::Descriptor;
    use crate::semihosting::mode::FileOpenMode;
    use crate::semihosting::trap::Breakpoint;

    const HOST: Semihosting<Breakpoint> = Semihosting::new(Breakpoint);

    /// Open a host file through the trap instruction.
    pub fn open(name: &CStr, mode: FileOpenMode) -> Descriptor {
        HOST.open(name, mode)
    }

    pub fn close(fd: Descriptor) -> i64 {
        HOST.close(fd)
    }

    pub fn read(fd: Descriptor, buf: &mut [u8]) -> i64 {
        HOST.read(fd, buf)
    }

    pub fn write(fd: Descriptor, buf: &[u8]) -> i64 {
        HOST.write(fd, buf)
    }

    pub fn exit(reason: usize) {
        HOST.exit(reason)
    }
}

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
pub use direct::{close, exit, open, read, write};
