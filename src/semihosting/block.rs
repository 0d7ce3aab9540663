//! Semihosting Argument Blocks
//!
//! The host reads parameters from memory by raw address, with no type
//! information. Every operation that takes more than one parameter gets a
//! block of consecutive machine words; which word means what depends only on
//! the operation code.
//!
//! # Layout
//! ```text
//! ┌─────────────────┬───────────────┬───────────────┬───────────────┐
//! │ Operation       │ word 0        │ word 1        │ word 2        │
//! ├─────────────────┼───────────────┼───────────────┼───────────────┤
//! │ Open            │ name pointer  │ mode code     │ name length   │
//! │ Close/FLen/IsTty│ descriptor    │ -             │ -             │
//! │ Read/Write      │ descriptor    │ buffer        │ count         │
//! │ Seek            │ descriptor    │ position      │ -             │
//! │ Remove          │ name pointer  │ name length   │ -             │
//! │ Exit            │ reason        │ -             │ -             │
//! │ ReportException │ exception     │ subcode       │ -             │
//! │ ExitExtended    │ exception     │ subcode       │ -             │
//! └─────────────────┴───────────────┴───────────────┴───────────────┘
//! ```
//!
//! Exit and ReportException use a block only on 64-bit targets; 32-bit
//! targets pass the reason in the parameter register instead (see
//! [`ExitConvention`](super::trap::ExitConvention)).
//!
//! Unused words are always zero. Blocks are scrubbed when dropped so buffer
//! addresses do not survive in dead stack slots.

use core::ffi::CStr;
use core::ptr;
use core::sync::atomic::{compiler_fence, Ordering};

use super::mode::FileOpenMode;
use super::opcode::{ExceptionCode, OperationCode};

/// Host-side file handle.
pub type Descriptor = i64;

/// Number of words in every argument block.
pub const BLOCK_WORDS: usize = 3;

/// Size of one block word in bytes.
pub const WORD_SIZE: usize = core::mem::size_of::<usize>();

/// Fixed-layout parameter record passed to the host by address.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub struct ArgumentBlock {
    words: [usize; BLOCK_WORDS],
}

const _: () = assert!(core::mem::size_of::<ArgumentBlock>() == BLOCK_WORDS * WORD_SIZE);
const _: () = assert!(core::mem::align_of::<ArgumentBlock>() == core::mem::align_of::<usize>());

impl ArgumentBlock {
    /// An all-zero block.
    #[inline]
    pub const fn zeroed() -> Self {
        Self {
            words: [0; BLOCK_WORDS],
        }
    }

    /// Build a block from explicit words. Used by simulated hosts and tests.
    #[inline]
    pub const fn from_words(words: [usize; BLOCK_WORDS]) -> Self {
        Self { words }
    }

    #[inline]
    pub fn words(&self) -> &[usize; BLOCK_WORDS] {
        &self.words
    }

    #[inline]
    pub fn word(&self, index: usize) -> usize {
        self.words[index]
    }

    /// The block's raw bytes as the host sees them.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: ArgumentBlock is repr(C) over plain integers with no padding
        // (checked at compile time above), so every byte is initialized.
        unsafe {
            core::slice::from_raw_parts(
                (self as *const Self).cast::<u8>(),
                core::mem::size_of::<Self>(),
            )
        }
    }

    /// Address handed to the host in the data register.
    #[inline]
    pub fn address(&mut self) -> usize {
        self as *mut Self as usize
    }

    /// Overwrite all words with zeros in a way the optimizer keeps.
    pub fn scrub(&mut self) {
        for word in self.words.iter_mut() {
            // SAFETY: `word` is a valid, aligned, exclusive reference.
            unsafe {
                ptr::write_volatile(word, 0);
            }
        }
        compiler_fence(Ordering::SeqCst);
    }
}

impl Drop for ArgumentBlock {
    fn drop(&mut self) {
        self.scrub();
    }
}

/// Parameters of one block-based call, keyed by operation.
#[derive(Debug)]
pub enum Arguments<'a> {
    Open {
        name: &'a CStr,
        mode: FileOpenMode,
    },
    Close {
        fd: Descriptor,
    },
    Read {
        fd: Descriptor,
        buf: &'a mut [u8],
    },
    Write {
        fd: Descriptor,
        buf: &'a [u8],
    },
    Seek {
        fd: Descriptor,
        position: usize,
    },
    FLen {
        fd: Descriptor,
    },
    IsTty {
        fd: Descriptor,
    },
    Remove {
        name: &'a CStr,
    },
    /// Bare termination reason in word 0.
    Exit {
        reason: usize,
    },
    ReportException {
        exception: ExceptionCode,
        subcode: usize,
    },
    /// Same layout as ReportException, under the ExitExtended operation.
    ExitExtended {
        exception: ExceptionCode,
        subcode: usize,
    },
}

impl Arguments<'_> {
    /// Operation code that interprets this layout.
    pub const fn operation(&self) -> OperationCode {
        match self {
            Self::Open { .. } => OperationCode::Open,
            Self::Close { .. } => OperationCode::Close,
            Self::Read { .. } => OperationCode::Read,
            Self::Write { .. } => OperationCode::Write,
            Self::Seek { .. } => OperationCode::Seek,
            Self::FLen { .. } => OperationCode::FLen,
            Self::IsTty { .. } => OperationCode::IsTty,
            Self::Remove { .. } => OperationCode::Remove,
            Self::Exit { .. } | Self::ReportException { .. } => OperationCode::ReportException,
            Self::ExitExtended { .. } => OperationCode::ExitExtended,
        }
    }

    /// Lower into the wire layout.
    ///
    /// Buffer addresses are copied into the block; the borrow in `self`
    /// must outlive the trap that consumes the block.
    pub fn marshal(&mut self) -> ArgumentBlock {
        let mut block = ArgumentBlock::zeroed();
        let w = &mut block.words;
        match self {
            Self::Open { name, mode } => {
                w[0] = name.as_ptr() as usize;
                w[1] = mode.code();
                w[2] = name.to_bytes().len();
            }
            Self::Close { fd } | Self::FLen { fd } | Self::IsTty { fd } => {
                w[0] = *fd as usize;
            }
            Self::Read { fd, buf } => {
                w[0] = *fd as usize;
                w[1] = buf.as_mut_ptr() as usize;
                w[2] = buf.len();
            }
            Self::Write { fd, buf } => {
                w[0] = *fd as usize;
                w[1] = buf.as_ptr() as usize;
                w[2] = buf.len();
            }
            Self::Seek { fd, position } => {
                w[0] = *fd as usize;
                w[1] = *position;
            }
            Self::Remove { name } => {
                w[0] = name.as_ptr() as usize;
                w[1] = name.to_bytes().len();
            }
            Self::Exit { reason } => {
                w[0] = *reason;
            }
            Self::ReportException { exception, subcode }
            | Self::ExitExtended { exception, subcode } => {
                w[0] = exception.code();
                w[1] = *subcode;
            }
        }
        block
    }
}
