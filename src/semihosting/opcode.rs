//! Semihosting Operation and Exception Codes
//!
//! Numeric identifiers fixed by the ARM semihosting protocol. The host
//! decodes these from the operation register, so they must never be
//! renumbered.

/// Operation numbers placed in the first argument register (x0/r0/a0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OperationCode {
    /// Open a host file.
    Open = 0x01,
    /// Close a host file.
    Close = 0x02,
    /// Write one character to the debug console.
    WriteC = 0x03,
    /// Write a NUL-terminated string to the debug console.
    Write0 = 0x04,
    /// Write a buffer to a host file.
    Write = 0x05,
    /// Read from a host file into a buffer.
    Read = 0x06,
    /// Read one character from the debug console.
    ReadC = 0x07,
    /// Ask the host whether a return code denotes an error.
    IsError = 0x08,
    /// Ask the host whether a descriptor is an interactive device.
    IsTty = 0x09,
    /// Seek to an absolute position in a host file.
    Seek = 0x0A,
    /// Length of a host file.
    FLen = 0x0C,
    /// Temporary file name.
    TmpNam = 0x0D,
    /// Delete a host file.
    Remove = 0x0E,
    /// Centiseconds since execution started.
    Clock = 0x10,
    /// Seconds since the Unix epoch.
    Time = 0x11,
    /// Run a host shell command.
    System = 0x12,
    /// Host errno of the last failed call.
    Errno = 0x13,
    /// Command line passed to the target.
    GetCmdLine = 0x15,
    /// Heap and stack layout.
    HeapInfo = 0x16,
    /// Switch to supervisor mode (legacy).
    EnterSvc = 0x17,
    /// Report an exception (and normally end the session).
    ReportException = 0x18,
    /// Report an exception with a subcode; the 32-bit form of a two-word
    /// ReportException.
    ExitExtended = 0x20,
}

impl OperationCode {
    /// The register value for this operation.
    #[inline]
    pub const fn code(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for OperationCode {
    type Error = usize;

    /// Decode a register value. Only simulated hosts need this.
    fn try_from(raw: usize) -> Result<Self, usize> {
        Ok(match raw {
            0x01 => Self::Open,
            0x02 => Self::Close,
            0x03 => Self::WriteC,
            0x04 => Self::Write0,
            0x05 => Self::Write,
            0x06 => Self::Read,
            0x07 => Self::ReadC,
            0x08 => Self::IsError,
            0x09 => Self::IsTty,
            0x0A => Self::Seek,
            0x0C => Self::FLen,
            0x0D => Self::TmpNam,
            0x0E => Self::Remove,
            0x10 => Self::Clock,
            0x11 => Self::Time,
            0x12 => Self::System,
            0x13 => Self::Errno,
            0x15 => Self::GetCmdLine,
            0x16 => Self::HeapInfo,
            0x17 => Self::EnterSvc,
            0x18 => Self::ReportException,
            0x20 => Self::ExitExtended,
            other => return Err(other),
        })
    }
}

/// Angel/ADP exception reasons carried by [`OperationCode::ReportException`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ExceptionCode {
    BreakPoint = 0x20020,
    WatchPoint = 0x20021,
    StepComplete = 0x20022,
    RunTimeErrorUnknown = 0x20023,
    InternalError = 0x20024,
    UserInterruption = 0x20025,
    /// Normal program termination.
    ApplicationExit = 0x20026,
    StackOverflow = 0x20027,
    DivisionByZero = 0x20028,
    OsSpecific = 0x20029,
}

impl ExceptionCode {
    #[inline]
    pub const fn code(self) -> usize {
        self as usize
    }
}
