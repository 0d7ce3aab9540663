//! Program Startup
//!
//! Runs the static constructors the toolchain collected into
//! `.preinit_array` and `.init_array`, then hands control to the program
//! entry point.
//!
//! # Memory Layout
//! The linker script must define:
//! - `__preinit_array_start` / `__preinit_array_end`
//! - `__init_array_start` / `__init_array_end`
//!
//! Empty ranges are fine.

use log::trace;

/// A static constructor.
pub type InitFn = unsafe extern "C" fn();

/// Program entry point; the returned value is the exit status.
pub type EntryFn = fn() -> i32;

/// Run `preinit` then `init` (each in table order), then `entry`.
///
/// # Safety
/// Every function in both tables must be safe to call exactly once, at this
/// point in startup.
pub unsafe fn run(preinit: &[InitFn], init: &[InitFn], entry: EntryFn) -> i32 {
    trace!("running {} preinit, {} init functions", preinit.len(), init.len());
    for &f in preinit.iter().chain(init) {
        // SAFETY: guaranteed by the caller.
        unsafe { f() };
    }
    entry()
}

/// Run the linker-collected constructor tables, then `entry`.
///
/// # Safety
/// Must be called once, from the reset path, after `.data`/`.bss` are set up.
#[cfg(target_os = "none")]
pub unsafe fn run_linked(entry: EntryFn) -> i32 {
    extern "C" {
        static __preinit_array_start: [InitFn; 0];
        static __preinit_array_end: [InitFn; 0];
        static __init_array_start: [InitFn; 0];
        static __init_array_end: [InitFn; 0];
    }

    // SAFETY: the linker script defines each start/end pair around a
    // contiguous array of function pointers.
    unsafe {
        let preinit = table(
            core::ptr::addr_of!(__preinit_array_start).cast(),
            core::ptr::addr_of!(__preinit_array_end).cast(),
        );
        let init = table(
            core::ptr::addr_of!(__init_array_start).cast(),
            core::ptr::addr_of!(__init_array_end).cast(),
        );
        run(preinit, init, entry)
    }
}

/// Slice over a linker-delimited table.
///
/// # Safety
/// `start..end` must bound an initialized array of `InitFn`.
#[cfg(target_os = "none")]
unsafe fn table(start: *const InitFn, end: *const InitFn) -> &'static [InitFn] {
    let len = (end as usize - start as usize) / core::mem::size_of::<InitFn>();
    if len == 0 {
        return &[];
    }
    // SAFETY: guaranteed by the caller.
    unsafe { core::slice::from_raw_parts(start, len) }
}
