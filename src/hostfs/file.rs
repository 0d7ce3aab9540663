//! Host Files
//!
//! RAII handle over a host descriptor. Unlike the raw gateway, every call
//! returns a `Result` and failures carry the host's errno.
//!
//! Read and Write on the wire return the number of bytes *not*
//! transferred; this layer converts that into bytes transferred.

use core::ffi::CStr;

use crate::semihosting::{Descriptor, FileOpenMode, Host, Semihosting};

use super::error::HostError;

/// Fetch the host errno for a call that just failed.
fn last_error<H: Host>(host: &Semihosting<H>) -> HostError {
    HostError::Host {
        errno: host.errno(),
    }
}

/// Delete a host file.
pub fn remove<H: Host>(host: &Semihosting<H>, path: &CStr) -> Result<(), HostError> {
    if host.remove(path) != 0 {
        return Err(last_error(host));
    }
    Ok(())
}

/// An open file on the host. Closed on drop.
#[derive(Debug)]
pub struct HostFile<H: Host> {
    host: Semihosting<H>,
    fd: Descriptor,
    mode: FileOpenMode,
    open: bool,
}

impl<H: Host> HostFile<H> {
    /// Open `path` on the host.
    pub fn open(host: Semihosting<H>, path: &CStr, mode: FileOpenMode) -> Result<Self, HostError> {
        let fd = host.open(path, mode);
        if fd < 0 {
            return Err(last_error(&host));
        }
        Ok(Self {
            host,
            fd,
            mode,
            open: true,
        })
    }

    #[inline]
    pub fn descriptor(&self) -> Descriptor {
        self.fd
    }

    #[inline]
    pub fn mode(&self) -> FileOpenMode {
        self.mode
    }

    /// Convert a "bytes not transferred" reply into bytes transferred.
    fn transferred(&self, requested: usize, reply: i64) -> Result<usize, HostError> {
        if reply < 0 {
            return Err(last_error(&self.host));
        }
        let remaining = reply as usize;
        if remaining > requested {
            return Err(HostError::BadTransferCount {
                requested,
                reported: remaining,
            });
        }
        Ok(requested - remaining)
    }

    /// Read into `buf`. Returns bytes read; 0 at end of file.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, HostError> {
        if !self.mode.is_readable() {
            return Err(HostError::NotReadable);
        }
        let requested = buf.len();
        let reply = self.host.read(self.fd, buf);
        self.transferred(requested, reply)
    }

    /// Write from `buf`. Returns bytes written.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize, HostError> {
        if !self.mode.is_writable() {
            return Err(HostError::NotWritable);
        }
        let reply = self.host.write(self.fd, buf);
        self.transferred(buf.len(), reply)
    }

    /// Write all of `buf`, retrying short writes.
    pub fn write_all(&mut self, mut buf: &[u8]) -> Result<(), HostError> {
        while !buf.is_empty() {
            let n = self.write(buf)?;
            if n == 0 {
                return Err(HostError::WriteZero);
            }
            buf = &buf[n..];
        }
        Ok(())
    }

    /// Move to an absolute byte offset.
    pub fn seek(&mut self, position: usize) -> Result<(), HostError> {
        if self.host.seek(self.fd, position) < 0 {
            return Err(last_error(&self.host));
        }
        Ok(())
    }

    /// Current length of the file in bytes.
    pub fn len(&self) -> Result<usize, HostError> {
        let len = self.host.flen(self.fd);
        if len < 0 {
            return Err(last_error(&self.host));
        }
        Ok(len as usize)
    }

    pub fn is_empty(&self) -> Result<bool, HostError> {
        Ok(self.len()? == 0)
    }

    /// Whether the descriptor is an interactive device.
    pub fn is_tty(&self) -> Result<bool, HostError> {
        match self.host.is_tty(self.fd) {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(last_error(&self.host)),
        }
    }

    /// Close and report the host's verdict.
    pub fn close(mut self) -> Result<(), HostError> {
        self.open = false;
        if self.host.close(self.fd) != 0 {
            return Err(last_error(&self.host));
        }
        Ok(())
    }
}

impl<H: Host> Drop for HostFile<H> {
    fn drop(&mut self) {
        if self.open {
            let _ = self.host.close(self.fd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semihosting::OperationCode;
    use crate::testing::SimHost;

    #[test]
    fn test_open_failure_carries_errno() {
        let sim = SimHost::new();
        sim.push_reply(-1); // open
        sim.push_reply(2); // errno: ENOENT
        let err = HostFile::open(Semihosting::new(&sim), c"nope.txt", FileOpenMode::Read)
            .unwrap_err();
        assert_eq!(err, HostError::Host { errno: 2 });
        assert_eq!(err.errno(), Some(2));
        assert_eq!(sim.last_trap().unwrap().op, OperationCode::Errno);
    }

    #[test]
    fn test_read_converts_remaining_count() {
        let sim = SimHost::new();
        sim.push_reply(4); // open
        sim.feed_input(b"hello");
        let mut file = HostFile::open(Semihosting::new(&sim), c"in.txt", FileOpenMode::Read).unwrap();
        assert_eq!(file.descriptor(), 4);

        sim.push_reply(3); // 3 of 8 bytes not read
        let mut buf = [0u8; 8];
        assert_eq!(file.read(&mut buf), Ok(5));
        assert_eq!(&buf[..5], b"hello");

        sim.push_reply(8);
        assert_eq!(file.read(&mut buf), Ok(0));
    }

    #[test]
    fn test_bad_transfer_count() {
        let sim = SimHost::new();
        sim.push_reply(4);
        let mut file = HostFile::open(Semihosting::new(&sim), c"out", FileOpenMode::Write).unwrap();
        sim.push_reply(10);
        assert_eq!(
            file.write(b"abc"),
            Err(HostError::BadTransferCount {
                requested: 3,
                reported: 10
            })
        );
    }

    #[test]
    fn test_mode_enforced_locally() {
        let sim = SimHost::new();
        sim.push_reply(5);
        let mut file = HostFile::open(Semihosting::new(&sim), c"log", FileOpenMode::Append).unwrap();
        let before = sim.trap_count();
        assert_eq!(file.read(&mut [0u8; 4]), Err(HostError::NotReadable));
        assert_eq!(sim.trap_count(), before);

        let mut file = HostFile::open(Semihosting::new(&sim), c"cfg", FileOpenMode::Read).unwrap();
        assert_eq!(file.write(b"x"), Err(HostError::NotWritable));
    }

    #[test]
    fn test_write_all_retries_short_writes() {
        let sim = SimHost::new();
        sim.push_reply(6);
        let mut file =
            HostFile::open(Semihosting::new(&sim), c"dump.bin", FileOpenMode::WriteBinary).unwrap();
        sim.push_reply(2); // 4 of 6 written
        sim.push_reply(0); // remaining 2 written
        file.write_all(b"abcdef").unwrap();

        let writes: Vec<_> = sim
            .traps()
            .into_iter()
            .filter(|t| t.op == OperationCode::Write)
            .collect();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].words.unwrap()[2], 2);
        assert_eq!(sim.output(), b"abcdefef");
    }

    #[test]
    fn test_write_all_stalled_host_is_write_zero() {
        let sim = SimHost::new();
        sim.push_reply(6);
        let mut file =
            HostFile::open(Semihosting::new(&sim), c"dump.bin", FileOpenMode::WriteBinary).unwrap();
        sim.push_reply(3); // nothing written, no failure reported
        assert_eq!(file.write_all(b"abc"), Err(HostError::WriteZero));
        assert_eq!(file.write_all(b"abc").unwrap_err().errno(), None);
        assert!(sim.traps().iter().all(|t| t.op != OperationCode::Errno));
    }

    #[test]
    fn test_queries() {
        let sim = SimHost::new();
        sim.push_reply(3);
        let mut file = HostFile::open(Semihosting::new(&sim), c"data", FileOpenMode::ReadUpdate).unwrap();
        sim.push_reply(512);
        assert_eq!(file.len(), Ok(512));
        sim.push_reply(0);
        assert_eq!(file.is_tty(), Ok(false));
        sim.push_reply(0);
        assert_eq!(file.seek(100), Ok(()));
        sim.push_reply(-1);
        sim.push_reply(22);
        assert_eq!(file.seek(usize::MAX), Err(HostError::Host { errno: 22 }));
    }

    #[test]
    fn test_close_and_drop() {
        let sim = SimHost::new();
        sim.push_reply(8);
        let file = HostFile::open(Semihosting::new(&sim), c"a", FileOpenMode::Read).unwrap();
        file.close().unwrap();
        let closes = sim.traps().iter().filter(|t| t.op == OperationCode::Close).count();
        assert_eq!(closes, 1);

        sim.push_reply(9);
        {
            let _file = HostFile::open(Semihosting::new(&sim), c"b", FileOpenMode::Read).unwrap();
        }
        let trap = sim.last_trap().unwrap();
        assert_eq!(trap.op, OperationCode::Close);
        assert_eq!(trap.words, Some([9, 0, 0]));
    }

    #[test]
    fn test_remove() {
        let sim = SimHost::new();
        assert_eq!(remove(&Semihosting::new(&sim), c"stale.lock"), Ok(()));
        sim.push_reply(-1);
        sim.push_reply(13);
        assert_eq!(
            remove(&Semihosting::new(&sim), c"locked"),
            Err(HostError::Host { errno: 13 })
        );
    }
}
