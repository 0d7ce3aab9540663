//! Semihosted Monitor Driver
//!
//! Byte-stream driver that forwards reads to the host's stdin (descriptor 0)
//! and writes to its stdout (descriptor 1).
//!
//! The host's transfer count is not consulted: both directions report the
//! requested length.

use crate::semihosting::{Descriptor, Host, Semihosting};

use super::console::STDOUT;
use super::registry::Driver;

/// Default device name of the monitor.
pub const MONITOR_NAME: &str = "/dev/tty";

const STDIN: Descriptor = 0;

/// Terminal driver backed by semihosting.
#[derive(Debug)]
pub struct SemihostedMonitor<H> {
    name: &'static str,
    host: Semihosting<H>,
}

impl<H: Host> SemihostedMonitor<H> {
    pub const fn new(host: H) -> Self {
        Self::with_name(MONITOR_NAME, host)
    }

    pub const fn with_name(name: &'static str, host: H) -> Self {
        Self {
            name,
            host: Semihosting::new(host),
        }
    }

    pub fn host(&self) -> &H {
        self.host.host()
    }

    /// The gateway this monitor forwards to.
    pub fn semihosting(&self) -> &Semihosting<H> {
        &self.host
    }
}

impl<H: Host + Sync> Driver for SemihostedMonitor<H> {
    fn name(&self) -> &str {
        self.name
    }

    fn init(&self) -> i32 {
        0
    }

    fn open(&self) -> i32 {
        0
    }

    fn close(&self) -> i32 {
        0
    }

    fn read(&self, buf: &mut [u8]) -> usize {
        let len = buf.len();
        self.host.read(STDIN, buf);
        len
    }

    fn write(&self, buf: &[u8]) -> usize {
        self.host.write(STDOUT, buf);
        buf.len()
    }

    fn control(&self, _event: u16, _input: &[u8], _output: &mut [u8]) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semihosting::OperationCode;
    use crate::testing::SimHost;

    #[test]
    fn test_write_goes_to_stdout() {
        let monitor = SemihostedMonitor::new(SimHost::replying(-1));
        assert_eq!(monitor.name(), "/dev/tty");
        assert_eq!(monitor.write(b"PASS\n"), 5);

        let trap = monitor.host().last_trap().unwrap();
        assert_eq!(trap.op, OperationCode::Write);
        assert_eq!(trap.words.unwrap()[0], 1);
        assert_eq!(trap.words.unwrap()[2], 5);
        assert_eq!(monitor.host().output(), b"PASS\n");
    }

    #[test]
    fn test_read_comes_from_stdin() {
        let monitor = SemihostedMonitor::new(SimHost::new());
        monitor.host().feed_input(b"y");
        monitor.host().push_reply(3);

        let mut buf = [0u8; 4];
        assert_eq!(monitor.read(&mut buf), 4);
        assert_eq!(buf[0], b'y');
        let trap = monitor.host().last_trap().unwrap();
        assert_eq!(trap.op, OperationCode::Read);
        assert_eq!(trap.words.unwrap()[0], 0);
    }

    #[test]
    fn test_lifecycle_calls_do_not_trap() {
        let monitor = SemihostedMonitor::with_name("/dev/semi", SimHost::new());
        assert_eq!(monitor.name(), "/dev/semi");
        assert_eq!(monitor.init(), 0);
        assert_eq!(monitor.open(), 0);
        assert_eq!(monitor.control(7, &[], &mut []), 0);
        assert_eq!(monitor.close(), 0);
        assert_eq!(monitor.host().trap_count(), 0);
    }
}
