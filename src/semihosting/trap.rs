//! Semihosting Trap Primitive
//!
//! The only code that crosses into the debug host. Everything above this
//! module depends on the [`Host`] contract, never on the instruction.
//!
//! # Register Convention
//! | Arch    | Operation | Parameter | Result | Instruction              |
//! |---------|-----------|-----------|--------|--------------------------|
//! | AArch64 | w0        | x1        | x0     | `hlt #0xf000`            |
//! | ARM M   | r0        | r1        | r0     | `bkpt #0xab`             |
//! | ARM A/R | r0        | r1        | r0     | `svc #0x123456` (A32)    |
//! |         |           |           |        | `svc #0xab` (T32)        |
//! | RISC-V  | a0        | a1        | a0     | `slli; ebreak; srai` seq |
//!
//! The target stays halted until the host services the request. A missing
//! host is indistinguishable from a very slow one.

use super::opcode::OperationCode;

/// Something that services semihosting operations.
///
/// Implemented by [`Breakpoint`] on real hardware and by simulated hosts in
/// tests.
pub trait Host {
    /// Execute `op` with `parameter` in the data register and return the
    /// raw result register.
    ///
    /// # Safety
    /// `parameter` must be what `op` expects: the address of a live
    /// [`ArgumentBlock`](super::block::ArgumentBlock) whose embedded addresses
    /// are valid for the accesses the operation performs, the address of a
    /// character or NUL-terminated string for WriteC/Write0, or zero for
    /// operations without a parameter.
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize;
}

/// How ReportException carries its reason.
///
/// 64-bit hosts read a two-word {reason, subcode} block. 32-bit hosts take
/// the reason itself in the parameter register and only accept a subcode
/// through ExitExtended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitConvention {
    /// Parameter register holds the address of an argument block.
    Block,
    /// Parameter register holds the reason code.
    Register,
}

impl ExitConvention {
    /// Convention of the target being compiled for.
    #[cfg(target_pointer_width = "64")]
    pub const NATIVE: Self = Self::Block;
    #[cfg(not(target_pointer_width = "64"))]
    pub const NATIVE: Self = Self::Register;
}

impl Default for ExitConvention {
    fn default() -> Self {
        Self::NATIVE
    }
}

impl<H: Host + ?Sized> Host for &H {
    #[inline]
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        // SAFETY: forwarded contract
        unsafe { (**self).trap(op, parameter) }
    }
}

/// The architecture's semihosting trap instruction.
#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Breakpoint;

#[cfg(target_arch = "aarch64")]
impl Host for Breakpoint {
    #[inline(always)]
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        let result: usize;
        // SAFETY: the caller upholds the parameter contract. The host may
        // read and write memory through `parameter`, so no `nomem`.
        unsafe {
            core::arch::asm!(
                "hlt #0xf000",
                inout("x0") op.code() => result,
                in("x1") parameter,
                options(nostack, preserves_flags)
            );
        }
        result
    }
}

#[cfg(all(target_arch = "arm", target_feature = "mclass"))]
impl Host for Breakpoint {
    #[inline(always)]
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        let result: usize;
        // SAFETY: see the AArch64 implementation.
        unsafe {
            core::arch::asm!(
                "bkpt #0xab",
                inout("r0") op.code() => result,
                in("r1") parameter,
                options(nostack, preserves_flags)
            );
        }
        result
    }
}

// A/R profile: the debugger intercepts the SVC vector. Taken from SVC mode
// the exception overwrites lr, so it is declared clobbered.
#[cfg(all(
    target_arch = "arm",
    not(target_feature = "mclass"),
    target_feature = "thumb-mode"
))]
impl Host for Breakpoint {
    #[inline(always)]
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        let result: usize;
        // SAFETY: see the AArch64 implementation.
        unsafe {
            core::arch::asm!(
                "svc #0xab",
                inout("r0") op.code() => result,
                in("r1") parameter,
                out("lr") _,
                options(nostack, preserves_flags)
            );
        }
        result
    }
}

#[cfg(all(
    target_arch = "arm",
    not(target_feature = "mclass"),
    not(target_feature = "thumb-mode")
))]
impl Host for Breakpoint {
    #[inline(always)]
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        let result: usize;
        // SAFETY: see the AArch64 implementation.
        unsafe {
            core::arch::asm!(
                "svc #0x123456",
                inout("r0") op.code() => result,
                in("r1") parameter,
                out("lr") _,
                options(nostack, preserves_flags)
            );
        }
        result
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
impl Host for Breakpoint {
    #[inline(always)]
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        let result: usize;
        // The three instructions must stay uncompressed and contiguous so
        // the debugger recognizes the sequence.
        // SAFETY: see the AArch64 implementation.
        unsafe {
            core::arch::asm!(
                ".balign 16",
                ".option push",
                ".option norvc",
                "slli x0, x0, 0x1f",
                "ebreak",
                "srai x0, x0, 7",
                ".option pop",
                inout("a0") op.code() => result,
                in("a1") parameter,
                options(nostack, preserves_flags)
            );
        }
        result
    }
}
