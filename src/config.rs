use crate::stack::{fail, guard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    Hosted,
    Freestanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalStrategy {
    Abort,
    KernelPanic,
    Halt,
}

/// Where the live stack guard value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardSource {
    Default,
    Build,
    Runtime,
}

pub const ENVIRONMENT: RuntimeEnvironment = if cfg!(feature = "hosted") {
    RuntimeEnvironment::Hosted
} else {
    RuntimeEnvironment::Freestanding
};

pub const POINTER_WIDTH: u32 = usize::BITS;

pub const SYMBOLS_EXPORTED: bool = cfg!(feature = "symbols");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    pub environment: RuntimeEnvironment,
    pub pointer_width: u32,
    pub default_strategy: FatalStrategy,
    pub active_strategy: FatalStrategy,
    pub guard_source: GuardSource,
    pub guard_sealed: bool,
    pub symbols_exported: bool,
}

impl PlatformConfig {
    /// Snapshot of the resolved build options and runtime overrides.
    pub fn current() -> Self {
        Self {
            environment: ENVIRONMENT,
            pointer_width: POINTER_WIDTH,
            default_strategy: fail::default_strategy(),
            active_strategy: fail::active_handler().strategy(),
            guard_source: guard::source(),
            guard_sealed: guard::is_sealed(),
            symbols_exported: SYMBOLS_EXPORTED,
        }
    }
}
