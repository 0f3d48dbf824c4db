//! Process-wide stack canary.
//!
//! The word starts at the build-time value (the fixed per-width default,
//! or `STACK_CHK_GUARD` from the build environment) and may be reseeded
//! exactly once during early boot. After that it is read-only.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use log::{info, warn};

use crate::config::GuardSource;
use crate::error::GuardError;

mod build {
    include!(concat!(env!("OUT_DIR"), "/guard_config.rs"));
}

#[cfg(target_pointer_width = "32")]
pub const DEFAULT_GUARD: usize = 0xe2de_e396;

#[cfg(target_pointer_width = "64")]
pub const DEFAULT_GUARD: usize = 0x595e_9fbd_94fd_a766;

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("stack guard is only defined for 32-bit and 64-bit targets");

/// Guard value the image is linked with.
pub const BUILD_GUARD: usize = match build::BUILD_GUARD {
    Some(value) => value,
    None => DEFAULT_GUARD,
};

const _: () = assert!(BUILD_GUARD != 0);
const _: () = assert!(DEFAULT_GUARD != 0);

// AtomicUsize has the layout of usize, so compiler-emitted prologue and
// epilogue loads see a plain pointer-sized word.
#[cfg_attr(feature = "symbols", export_name = "__stack_chk_guard")]
pub(crate) static STACK_CHK_GUARD: AtomicUsize = AtomicUsize::new(BUILD_GUARD);

static SEALED: AtomicBool = AtomicBool::new(false);
static RESEEDED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn value() -> usize {
    STACK_CHK_GUARD.load(Ordering::Relaxed)
}

/// Reseed the guard, typically from a hardware RNG on the boot path.
///
/// Must run before any frame protected by the old value is live on any
/// stack: those frames would fail their check on return. Call it from a
/// function built without stack protection. Seals the guard.
pub fn install(new_guard: usize) -> Result<(), GuardError> {
    if new_guard == 0 {
        warn!("stack guard install rejected: zero value");
        return Err(GuardError::Zero);
    }
    if SEALED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        warn!("stack guard install rejected: guard sealed");
        return Err(GuardError::Sealed);
    }
    STACK_CHK_GUARD.store(new_guard, Ordering::SeqCst);
    RESEEDED.store(true, Ordering::SeqCst);
    info!("stack guard reseeded at runtime");
    Ok(())
}

/// Freeze the current value. Idempotent.
pub fn seal() {
    if !SEALED.swap(true, Ordering::AcqRel) {
        info!("stack guard sealed");
    }
}

pub fn is_sealed() -> bool {
    SEALED.load(Ordering::Acquire)
}

pub fn source() -> GuardSource {
    if RESEEDED.load(Ordering::Acquire) {
        GuardSource::Runtime
    } else if build::BUILD_GUARD.is_some() {
        GuardSource::Build
    } else {
        GuardSource::Default
    }
}
