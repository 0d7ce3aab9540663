//! Host file errors

use core::fmt;

/// Why a host file operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    /// The host reported failure; `errno` is its Errno value.
    Host { errno: i64 },
    /// The file was opened without read access.
    NotReadable,
    /// The file was opened without write access.
    NotWritable,
    /// The host returned a count larger than the request.
    BadTransferCount { requested: usize, reported: usize },
    /// The host accepted none of a write without reporting failure.
    WriteZero,
}

impl HostError {
    /// Host errno, if this error came from the host.
    pub const fn errno(&self) -> Option<i64> {
        match self {
            Self::Host { errno } => Some(*errno),
            _ => None,
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host { errno } => write!(f, "host operation failed (errno {})", errno),
            Self::NotReadable => write!(f, "file not opened for reading"),
            Self::NotWritable => write!(f, "file not opened for writing"),
            Self::BadTransferCount {
                requested,
                reported,
            } => write!(
                f,
                "host reported {} bytes outstanding for a {} byte transfer",
                reported, requested
            ),
            Self::WriteZero => write!(f, "host accepted no bytes"),
        }
    }
}
