#![cfg_attr(not(test), no_std)]
#![allow(dead_code)]

#[cfg(all(feature = "hosted", not(test)))]
extern crate std;

pub mod config;
pub mod error;
pub mod hisi;
pub mod stack;

pub use config::{FatalStrategy, GuardSource, PlatformConfig, RuntimeEnvironment};
pub use error::{GuardError, LayoutError, RegisterError};
pub use hisi::ispreg::{
    PeriCrg60, RegisterField, RegisterLayout, FieldKind,
    CV300_CRG_BASE, CV300_PERI_CRG11_ADDR, EV300_PERI_CRG60, EV300_PERI_CRG60_ADDR,
};
pub use hisi::crg_registers::{MmioBus, RegAddr, RegisterBus};
pub use stack::fail::{stack_check_failed, FatalHandler, STACK_SMASHING_MSG};
pub use stack::guard::DEFAULT_GUARD;

pub const PLATFORM_VERSION: &str = "1.0.0";
