use thiserror::Error;

/// Rejected guard or handler installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("stack guard value must be nonzero")]
    Zero,
    #[error("stack guard is sealed, reseeding is no longer allowed")]
    Sealed,
    #[error("a stack smashing handler is already installed")]
    HandlerAlreadyInstalled,
    #[error("a kernel panic hook is already registered")]
    PanicHookAlreadySet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("value {value:#x} does not fit field {field} ({width} bits)")]
    FieldOverflow {
        field: &'static str,
        width: u8,
        value: u32,
    },
    #[error("address {addr:#x} is outside the mapped window")]
    Unmapped { addr: usize },
}

/// Register layout that contradicts the datasheet rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("field #{index} has zero width")]
    EmptyField { index: usize },
    #[error("field #{index} exceeds the register width")]
    Overflow { index: usize },
    #[error("field #{index} overlaps a previous field")]
    Overlap { index: usize },
}
