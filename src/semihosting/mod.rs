//! ARM Semihosting Gateway
//!
//! Lets bare-metal code ask an attached debugger or simulator to do file and
//! process operations on its behalf.
//!
//! # Call Path
//! ```text
//! Semihosting::open/read/...   typed entry point        (call.rs)
//!        │
//!        ▼
//! Arguments::marshal           stack-local word block   (block.rs)
//!        │
//!        ▼
//! Host::trap                   op → r0, &block → r1     (trap.rs)
//!        │                     hlt / bkpt / svc / ebreak
//!        ▼
//! result register, unchanged
//! ```
//!
//! Exit is the one call whose parameter depends on the word width; see
//! [`ExitConvention`].
//!
//! No state survives a call. Concurrent callers each own their block.

mod block;
mod call;
mod mode;
mod opcode;
mod trap;

pub use block::{ArgumentBlock, Arguments, Descriptor, BLOCK_WORDS, WORD_SIZE};
pub use call::{Semihosting, HOST_ERROR};
pub use mode::{FileOpenMode, ModeFlags};
pub use opcode::{ExceptionCode, OperationCode};
pub use trap::{ExitConvention, Host};

#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
pub use call::{close, exit, open, read, write};
#[cfg(any(
    target_arch = "aarch64",
    target_arch = "arm",
    target_arch = "riscv32",
    target_arch = "riscv64"
))]
pub use trap::Breakpoint;
