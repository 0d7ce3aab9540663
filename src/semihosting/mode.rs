//! ANSI File Open Modes
//!
//! The host keeps its own table of the twelve `fopen` mode strings and
//! indexes it with the numeric code sent in the Open argument block. The
//! enumerator order below is that table's order.

use bitflags::bitflags;

bitflags! {
    /// Access properties implied by an open mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModeFlags: u8 {
        /// Reads are permitted.
        const READ = 1 << 0;
        /// Writes are permitted.
        const WRITE = 1 << 1;
        /// The file is created if missing.
        const CREATE = 1 << 2;
        /// Existing contents are discarded on open.
        const TRUNCATE = 1 << 3;
        /// Every write goes to the end of the file.
        const APPEND = 1 << 4;
        /// No newline translation.
        const BINARY = 1 << 5;
    }
}

/// One of the twelve ANSI `fopen` modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FileOpenMode {
    /// "r"
    Read = 0,
    /// "rb"
    ReadBinary = 1,
    /// "r+"
    ReadUpdate = 2,
    /// "r+b"
    ReadUpdateBinary = 3,
    /// "w"
    Write = 4,
    /// "wb"
    WriteBinary = 5,
    /// "w+"
    WriteUpdate = 6,
    /// "w+b"
    WriteUpdateBinary = 7,
    /// "a"
    Append = 8,
    /// "ab"
    AppendBinary = 9,
    /// "a+"
    AppendUpdate = 10,
    /// "a+b"
    AppendUpdateBinary = 11,
}

impl FileOpenMode {
    /// All modes, in wire-code order.
    pub const ALL: [FileOpenMode; 12] = [
        Self::Read,
        Self::ReadBinary,
        Self::ReadUpdate,
        Self::ReadUpdateBinary,
        Self::Write,
        Self::WriteBinary,
        Self::WriteUpdate,
        Self::WriteUpdateBinary,
        Self::Append,
        Self::AppendBinary,
        Self::AppendUpdate,
        Self::AppendUpdateBinary,
    ];

    /// Numeric code sent to the host.
    #[inline]
    pub const fn code(self) -> usize {
        self as usize
    }

    /// Decode a wire code.
    pub const fn from_code(code: usize) -> Option<Self> {
        if code < Self::ALL.len() {
            Some(Self::ALL[code])
        } else {
            None
        }
    }

    /// The `fopen` string for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadBinary => "rb",
            Self::ReadUpdate => "r+",
            Self::ReadUpdateBinary => "r+b",
            Self::Write => "w",
            Self::WriteBinary => "wb",
            Self::WriteUpdate => "w+",
            Self::WriteUpdateBinary => "w+b",
            Self::Append => "a",
            Self::AppendBinary => "ab",
            Self::AppendUpdate => "a+",
            Self::AppendUpdateBinary => "a+b",
        }
    }

    /// Parse an `fopen` string. Only the twelve canonical spellings are
    /// accepted ("rb+" is not).
    pub fn parse(mode: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == mode)
    }

    /// Access properties of this mode.
    pub const fn flags(self) -> ModeFlags {
        let base = match self.code() / 4 {
            0 => ModeFlags::READ,
            1 => ModeFlags::WRITE.union(ModeFlags::CREATE).union(ModeFlags::TRUNCATE),
            _ => ModeFlags::WRITE.union(ModeFlags::CREATE).union(ModeFlags::APPEND),
        };
        // Within each group of four: plain, binary, update, update+binary.
        let variant = self.code() % 4;
        let base = if variant >= 2 {
            base.union(ModeFlags::READ).union(ModeFlags::WRITE)
        } else {
            base
        };
        if variant % 2 == 1 {
            base.union(ModeFlags::BINARY)
        } else {
            base
        }
    }

    #[inline]
    pub const fn is_readable(self) -> bool {
        self.flags().contains(ModeFlags::READ)
    }

    #[inline]
    pub const fn is_writable(self) -> bool {
        self.flags().contains(ModeFlags::WRITE)
    }
}

impl core::fmt::Display for FileOpenMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
