pub mod fail;
pub mod guard;

#[cfg(feature = "symbols")]
pub mod symbols;

pub use self::fail::{
    active_handler, install_handler, set_kernel_panic_hook, stack_check_failed,
    FatalHandler, Halt, KernelPanic, STACK_SMASHING_MSG,
};
#[cfg(feature = "hosted")]
pub use self::fail::HostedAbort;
pub use self::guard::{BUILD_GUARD, DEFAULT_GUARD};
