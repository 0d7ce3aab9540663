//! Simulated semihosting host for unit tests.
//!
//! Decodes every trap the way a debugger would, records it, performs the
//! console/file side effects against in-memory queues, and replies from a
//! script.

use std::collections::VecDeque;
use std::ffi::CStr;
use std::sync::Mutex;
use std::vec::Vec;

use crate::semihosting::{ExitConvention, Host, OperationCode, BLOCK_WORDS};

/// One decoded trap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trap {
    pub op: OperationCode,
    pub parameter: usize,
    /// Block contents for block-based operations.
    pub words: Option<[usize; BLOCK_WORDS]>,
    /// Name for Open/Remove, string for Write0, character for WriteC.
    pub text: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
struct State {
    traps: Vec<Trap>,
    replies: VecDeque<usize>,
    default_reply: usize,
    input: VecDeque<u8>,
    output: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct SimHost {
    state: Mutex<State>,
    exit: ExitConvention,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that decodes ReportException as a 64-bit (block) or 32-bit
    /// (register) debugger would.
    pub fn with_exit_convention(exit: ExitConvention) -> Self {
        Self {
            state: Mutex::default(),
            exit,
        }
    }

    /// Host that answers every call with `reply`.
    pub fn replying(reply: isize) -> Self {
        let host = Self::new();
        host.set_default_reply(reply);
        host
    }

    /// A host with `'static` lifetime, for registries and globals.
    pub fn leaked() -> &'static SimHost {
        Box::leak(Box::new(Self::new()))
    }

    pub fn set_default_reply(&self, reply: isize) {
        self.state.lock().unwrap().default_reply = reply as usize;
    }

    /// Queue a one-shot reply, used before the default.
    pub fn push_reply(&self, reply: isize) {
        self.state.lock().unwrap().replies.push_back(reply as usize);
    }

    /// Bytes later delivered by Read/ReadC.
    pub fn feed_input(&self, bytes: &[u8]) {
        self.state.lock().unwrap().input.extend(bytes.iter().copied());
    }

    /// Everything written through Write/WriteC/Write0.
    pub fn output(&self) -> Vec<u8> {
        self.state.lock().unwrap().output.clone()
    }

    pub fn traps(&self) -> Vec<Trap> {
        self.state.lock().unwrap().traps.clone()
    }

    pub fn last_trap(&self) -> Option<Trap> {
        self.state.lock().unwrap().traps.last().cloned()
    }

    pub fn trap_count(&self) -> usize {
        self.state.lock().unwrap().traps.len()
    }
}

fn is_block_operation(op: OperationCode, exit: ExitConvention) -> bool {
    if op == OperationCode::ReportException {
        return exit == ExitConvention::Block;
    }
    matches!(
        op,
        OperationCode::Open
            | OperationCode::Close
            | OperationCode::Write
            | OperationCode::Read
            | OperationCode::Seek
            | OperationCode::FLen
            | OperationCode::IsTty
            | OperationCode::Remove
            | OperationCode::ExitExtended
    )
}

impl Host for SimHost {
    unsafe fn trap(&self, op: OperationCode, parameter: usize) -> usize {
        let words = if is_block_operation(op, self.exit) {
            // SAFETY: caller passes a live block for block operations.
            Some(unsafe { core::ptr::read(parameter as *const [usize; BLOCK_WORDS]) })
        } else {
            None
        };

        let text = match (op, words) {
            (OperationCode::Open, Some(w)) | (OperationCode::Remove, Some(w)) => {
                // SAFETY: word 0 is a NUL-terminated name.
                Some(unsafe { CStr::from_ptr(w[0] as *const _) }.to_bytes().to_vec())
            }
            // SAFETY: parameter is a NUL-terminated string.
            (OperationCode::Write0, _) => {
                Some(unsafe { CStr::from_ptr(parameter as *const _) }.to_bytes().to_vec())
            }
            // SAFETY: parameter is the address of one byte.
            (OperationCode::WriteC, _) => Some(vec![unsafe { *(parameter as *const u8) }]),
            _ => None,
        };

        let mut state = self.state.lock().unwrap();

        match (op, words) {
            (OperationCode::Write, Some(w)) => {
                // SAFETY: word 1/2 describe the caller's source buffer.
                let data = unsafe { core::slice::from_raw_parts(w[1] as *const u8, w[2]) };
                state.output.extend_from_slice(data);
            }
            (OperationCode::Read, Some(w)) => {
                // SAFETY: word 1/2 describe the caller's destination buffer.
                let buf = unsafe { core::slice::from_raw_parts_mut(w[1] as *mut u8, w[2]) };
                for slot in buf.iter_mut() {
                    match state.input.pop_front() {
                        Some(byte) => *slot = byte,
                        None => break,
                    }
                }
            }
            (OperationCode::WriteC, _) | (OperationCode::Write0, _) => {
                if let Some(t) = &text {
                    state.output.extend_from_slice(t);
                }
            }
            _ => {}
        }

        let reply = match op {
            OperationCode::ReadC if state.replies.is_empty() => {
                state.input.pop_front().map_or(usize::MAX, usize::from)
            }
            _ => match state.replies.pop_front() {
                Some(reply) => reply,
                None => state.default_reply,
            },
        };

        state.traps.push(Trap {
            op,
            parameter,
            words,
            text,
        });
        reply
    }
}
