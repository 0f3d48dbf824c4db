//! Stack smashing failure path.
//!
//! Reached only from compiler-emitted epilogue checks. Every strategy is
//! terminal: there is no recovery from a corrupted stack.

use core::sync::atomic::{compiler_fence, Ordering};
use log::{error, info, warn};
use spin::Once;

use crate::config::FatalStrategy;
use crate::error::GuardError;

pub const STACK_SMASHING_MSG: &str = "Stack smashing detected";

/// Terminal reaction to a fatal runtime fault.
pub trait FatalHandler: Sync {
    fn fatal(&self, msg: &'static str) -> !;

    fn strategy(&self) -> FatalStrategy;
}

/// Hosted builds: abort the process, no unwinding and no atexit handlers.
#[cfg(feature = "hosted")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostedAbort;

#[cfg(feature = "hosted")]
impl FatalHandler for HostedAbort {
    fn fatal(&self, _msg: &'static str) -> ! {
        std::process::abort()
    }

    fn strategy(&self) -> FatalStrategy {
        FatalStrategy::Abort
    }
}

/// Kernel builds: report through the kernel fatal-error path.
///
/// Uses the hook from [`set_kernel_panic_hook`] when the kernel registered
/// one, otherwise `panic!`s into the kernel's `#[panic_handler]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelPanic;

impl FatalHandler for KernelPanic {
    fn fatal(&self, msg: &'static str) -> ! {
        if let Some(hook) = PANIC_HOOK.get() {
            hook(msg);
        }
        panic!("{}", msg)
    }

    fn strategy(&self) -> FatalStrategy {
        FatalStrategy::KernelPanic
    }
}

/// Freestanding without a kernel: nothing to report to, stop here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Halt;

impl FatalHandler for Halt {
    fn fatal(&self, _msg: &'static str) -> ! {
        loop {
            compiler_fence(Ordering::SeqCst);
            core::hint::spin_loop();
        }
    }

    fn strategy(&self) -> FatalStrategy {
        FatalStrategy::Halt
    }
}

#[cfg(feature = "hosted")]
static DEFAULT_HANDLER: HostedAbort = HostedAbort;

#[cfg(all(not(feature = "hosted"), feature = "kernel"))]
static DEFAULT_HANDLER: KernelPanic = KernelPanic;

#[cfg(all(not(feature = "hosted"), not(feature = "kernel")))]
static DEFAULT_HANDLER: Halt = Halt;

static HANDLER: Once<&'static dyn FatalHandler> = Once::new();
static PANIC_HOOK: Once<fn(&'static str) -> !> = Once::new();

/// Replace the build-time handler. First install wins.
pub fn install_handler(handler: &'static dyn FatalHandler) -> Result<(), GuardError> {
    let mut installed = false;
    HANDLER.call_once(|| {
        installed = true;
        handler
    });
    if installed {
        info!("stack smashing handler installed: {:?}", handler.strategy());
        Ok(())
    } else {
        warn!("stack smashing handler already installed, keeping the first one");
        Err(GuardError::HandlerAlreadyInstalled)
    }
}

/// Register the kernel routine used by [`KernelPanic`].
pub fn set_kernel_panic_hook(hook: fn(&'static str) -> !) -> Result<(), GuardError> {
    let mut installed = false;
    PANIC_HOOK.call_once(|| {
        installed = true;
        hook
    });
    if installed {
        info!("kernel panic hook registered");
        Ok(())
    } else {
        Err(GuardError::PanicHookAlreadySet)
    }
}

pub fn active_handler() -> &'static dyn FatalHandler {
    match HANDLER.get() {
        Some(handler) => *handler,
        None => &DEFAULT_HANDLER,
    }
}

pub fn default_strategy() -> FatalStrategy {
    DEFAULT_HANDLER.strategy()
}

/// Runs the terminal handler if dropped, which only happens when the
/// logger unwinds out of `error!`.
struct TerminateOnUnwind;

impl Drop for TerminateOnUnwind {
    fn drop(&mut self) {
        active_handler().fatal(STACK_SMASHING_MSG)
    }
}

/// Body of `__stack_chk_fail`. Never returns, even if the installed
/// logger panics.
#[cold]
#[inline(never)]
pub fn stack_check_failed() -> ! {
    let armed = TerminateOnUnwind;
    error!("{}", STACK_SMASHING_MSG);
    core::mem::forget(armed);
    active_handler().fatal(STACK_SMASHING_MSG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_panic_without_hook_panics_with_fixed_message() {
        let payload = std::panic::catch_unwind(|| KernelPanic.fatal(STACK_SMASHING_MSG))
            .expect_err("fatal must not return");
        let msg = payload
            .downcast_ref::<std::string::String>()
            .map(|s| s.as_str())
            .or_else(|| payload.downcast_ref::<&str>().copied());
        assert_eq!(msg, Some(STACK_SMASHING_MSG));
    }

    #[test]
    fn strategies_report_themselves() {
        assert_eq!(KernelPanic.strategy(), FatalStrategy::KernelPanic);
        assert_eq!(Halt.strategy(), FatalStrategy::Halt);
        #[cfg(feature = "hosted")]
        assert_eq!(default_strategy(), FatalStrategy::Abort);
    }
}
