//! Process setup that keeps the acquisition loop from missing samples.
//!
//! Must run once, before the loop is entered:
//! the process gets a fixed SCHED_FIFO priority, all current and future
//! pages are locked into memory, and the stack the loop will use is
//! touched so that growing into it later cannot page fault.

use std::io;

use crate::constants::STACK_PREFAULT_BYTES;
use crate::error::{Error, Result};

pub fn setup(priority: i32) -> Result<()> {
    setup_with(priority, set_fifo_priority, lock_memory)
}

/// Run the setup steps in order with the given scheduling and
/// memory locking calls.
fn setup_with<S, L>(priority: i32, set_priority: S, lock: L) -> Result<()>
where
    S: FnOnce(i32) -> io::Result<()>,
    L: FnOnce() -> io::Result<()>,
{
    set_priority(priority)
        .map_err(|source| Error::Scheduling { priority, source })?;
    log::info!("Running with SCHED_FIFO priority {}", priority);

    lock().map_err(Error::MemoryLock)?;
    log::info!("Locked current and future memory");

    let pages = prefault_stack(STACK_PREFAULT_BYTES);
    log::debug!("Touched {} stack pages", pages);
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_fifo_priority(priority: i32) -> io::Result<()> {
    // sched_param has extra fields on some targets, zero them.
    let mut param: libc::sched_param = unsafe { std::mem::zeroed() };
    param.sched_priority = priority;
    // SAFETY: param is a valid sched_param that outlives the call.
    let ret = unsafe { libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) };
    if ret == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(target_os = "linux")]
fn lock_memory() -> io::Result<()> {
    // SAFETY: mlockall takes no pointers.
    let ret = unsafe { libc::mlockall(libc::MCL_CURRENT | libc::MCL_FUTURE) };
    if ret == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(target_os = "linux"))]
fn set_fifo_priority(_priority: i32) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "real-time scheduling requires Linux"))
}

#[cfg(not(target_os = "linux"))]
fn lock_memory() -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "memory locking requires Linux"))
}

fn page_size() -> usize {
    #[cfg(unix)]
    {
        // SAFETY: sysconf has no preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 {
            return size as usize;
        }
    }
    4096
}

/// Write to every page of a `bytes` long stack frame.
/// Returns the number of pages touched.
#[inline(never)]
fn prefault_stack(bytes: usize) -> usize {
    let mut frame = [0u8; STACK_PREFAULT_BYTES];
    let frame = &mut frame[..bytes.min(STACK_PREFAULT_BYTES)];
    let mut pages = 0;
    for byte in frame.iter_mut().step_by(page_size()) {
        *byte = 1;
        pages += 1;
    }
    std::hint::black_box(frame);
    pages
}
