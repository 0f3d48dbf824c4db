//! ISP sensor clock/reset registers of the CV300 and EV300 CRG blocks.
//!
//! Addresses and bit positions follow the HiSilicon reference manuals.
//! Layouts are checked at compile time: fields never overlap and never
//! run past the 32-bit register.

use core::fmt;

use crate::error::{LayoutError, RegisterError};
use crate::hisi::crg_registers::{RegAddr, RegisterBus};

pub const CV300_CRG_BASE: RegAddr = 0x1201_0000;
pub const CV300_PERI_CRG11_ADDR: RegAddr = CV300_CRG_BASE + 0x002C;

pub const EV300_PERI_CRG60_ADDR: RegAddr = 0x1201_00F0;

pub const CRG_REGISTER_WIDTH: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ClockEnable,
    ResetRequest,
    ClockSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterField {
    pub name: &'static str,
    pub offset: u8,
    pub width: u8,
    pub kind: FieldKind,
}

impl RegisterField {
    pub const fn new(name: &'static str, offset: u8, width: u8, kind: FieldKind) -> Self {
        Self { name, offset, width, kind }
    }

    /// First bit past the field.
    pub const fn end(&self) -> u16 {
        self.offset as u16 + self.width as u16
    }

    pub const fn max_value(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    pub const fn mask(&self) -> u32 {
        if self.offset >= 32 {
            return 0;
        }
        self.max_value() << self.offset
    }

    pub const fn extract(&self, raw: u32) -> u32 {
        (raw & self.mask()) >> self.offset
    }

    pub fn insert(&self, raw: u32, value: u32) -> Result<u32, RegisterError> {
        if value > self.max_value() {
            return Err(RegisterError::FieldOverflow {
                field: self.name,
                width: self.width,
                value,
            });
        }
        Ok((raw & !self.mask()) | (value << self.offset))
    }

    const fn with_flag(&self, raw: u32, on: bool) -> u32 {
        if on {
            raw | self.mask()
        } else {
            raw & !self.mask()
        }
    }
}

/// A register at a fixed address with its datasheet field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    pub name: &'static str,
    pub addr: RegAddr,
    pub width: u8,
    pub fields: &'static [RegisterField],
}

impl RegisterLayout {
    pub const fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = 0u32;
        let mut index = 0;
        while index < self.fields.len() {
            let field = &self.fields[index];
            if field.width == 0 {
                return Err(LayoutError::EmptyField { index });
            }
            if field.end() > self.width as u16 {
                return Err(LayoutError::Overflow { index });
            }
            if seen & field.mask() != 0 {
                return Err(LayoutError::Overlap { index });
            }
            seen |= field.mask();
            index += 1;
        }
        Ok(())
    }

    /// Sum of the declared field widths.
    pub const fn used_bits(&self) -> u32 {
        let mut total = 0u32;
        let mut index = 0;
        while index < self.fields.len() {
            total += self.fields[index].width as u32;
            index += 1;
        }
        total
    }

    pub const fn defined_mask(&self) -> u32 {
        let mut mask = 0u32;
        let mut index = 0;
        while index < self.fields.len() {
            mask |= self.fields[index].mask();
            index += 1;
        }
        mask
    }

    /// True when each field starts where the previous one ended, from bit 0.
    pub const fn is_packed(&self) -> bool {
        let mut next = 0u16;
        let mut index = 0;
        while index < self.fields.len() {
            if self.fields[index].offset as u16 != next {
                return false;
            }
            next = self.fields[index].end();
            index += 1;
        }
        true
    }

    pub fn field(&self, name: &str) -> Option<&'static RegisterField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub const SENSOR0_CKEN: RegisterField =
    RegisterField::new("sensor0_cken", 0, 1, FieldKind::ClockEnable);
pub const SENSOR0_SRST_REQ: RegisterField =
    RegisterField::new("sensor0_srst_req", 1, 1, FieldKind::ResetRequest);
pub const SENSOR0_CKSEL: RegisterField =
    RegisterField::new("sensor0_cksel", 2, 3, FieldKind::ClockSelect);
pub const SENSOR0_CTRL_CKEN: RegisterField =
    RegisterField::new("sensor0_ctrl_cken", 5, 1, FieldKind::ClockEnable);
pub const SENSOR0_CTRL_SRST_REQ: RegisterField =
    RegisterField::new("sensor0_ctrl_srst_req", 6, 1, FieldKind::ResetRequest);

/// EV300 PERI_CRG60: sensor 0 clock gating, reset and clock source.
pub const EV300_PERI_CRG60: RegisterLayout = RegisterLayout {
    name: "PERI_CRG60",
    addr: EV300_PERI_CRG60_ADDR,
    width: CRG_REGISTER_WIDTH,
    fields: &[
        SENSOR0_CKEN,
        SENSOR0_SRST_REQ,
        SENSOR0_CKSEL,
        SENSOR0_CTRL_CKEN,
        SENSOR0_CTRL_SRST_REQ,
    ],
};

const _: () = assert!(EV300_PERI_CRG60.validate().is_ok());
const _: () = assert!(EV300_PERI_CRG60.is_packed());
const _: () = assert!(EV300_PERI_CRG60.used_bits() <= CRG_REGISTER_WIDTH as u32);

/// Raw value of PERI_CRG60. Bits above the declared fields are reserved
/// and carried through untouched.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct PeriCrg60(u32);

impl PeriCrg60 {
    pub const ADDR: RegAddr = EV300_PERI_CRG60_ADDR;
    pub const LAYOUT: &'static RegisterLayout = &EV300_PERI_CRG60;
    pub const CKSEL_MAX: u8 = 0b111;

    pub const fn from_bits(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn reserved_bits(self) -> u32 {
        self.0 & !EV300_PERI_CRG60.defined_mask()
    }

    pub const fn sensor0_cken(self) -> bool {
        SENSOR0_CKEN.extract(self.0) != 0
    }

    pub const fn sensor0_srst_req(self) -> bool {
        SENSOR0_SRST_REQ.extract(self.0) != 0
    }

    pub const fn sensor0_cksel(self) -> u8 {
        SENSOR0_CKSEL.extract(self.0) as u8
    }

    pub const fn sensor0_ctrl_cken(self) -> bool {
        SENSOR0_CTRL_CKEN.extract(self.0) != 0
    }

    pub const fn sensor0_ctrl_srst_req(self) -> bool {
        SENSOR0_CTRL_SRST_REQ.extract(self.0) != 0
    }

    pub const fn with_sensor0_cken(self, on: bool) -> Self {
        Self(SENSOR0_CKEN.with_flag(self.0, on))
    }

    pub const fn with_sensor0_srst_req(self, on: bool) -> Self {
        Self(SENSOR0_SRST_REQ.with_flag(self.0, on))
    }

    pub fn with_sensor0_cksel(self, code: u8) -> Result<Self, RegisterError> {
        SENSOR0_CKSEL.insert(self.0, code as u32).map(Self)
    }

    pub const fn with_sensor0_ctrl_cken(self, on: bool) -> Self {
        Self(SENSOR0_CTRL_CKEN.with_flag(self.0, on))
    }

    pub const fn with_sensor0_ctrl_srst_req(self, on: bool) -> Self {
        Self(SENSOR0_CTRL_SRST_REQ.with_flag(self.0, on))
    }

    pub fn load<B: RegisterBus + ?Sized>(bus: &B) -> Result<Self, RegisterError> {
        bus.read32(Self::ADDR).map(Self)
    }

    pub fn store<B: RegisterBus + ?Sized>(self, bus: &B) -> Result<(), RegisterError> {
        bus.write32(Self::ADDR, self.0)
    }

    /// Read-modify-write. Returns the value written.
    pub fn modify<B, F>(bus: &B, f: F) -> Result<Self, RegisterError>
    where
        B: RegisterBus + ?Sized,
        F: FnOnce(Self) -> Result<Self, RegisterError>,
    {
        let next = f(Self::load(bus)?)?;
        next.store(bus)?;
        Ok(next)
    }
}

impl fmt::Debug for PeriCrg60 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeriCrg60")
            .field("raw", &format_args!("{:#010x}", self.0))
            .field("sensor0_cken", &self.sensor0_cken())
            .field("sensor0_srst_req", &self.sensor0_srst_req())
            .field("sensor0_cksel", &self.sensor0_cksel())
            .field("sensor0_ctrl_cken", &self.sensor0_ctrl_cken())
            .field("sensor0_ctrl_srst_req", &self.sensor0_ctrl_srst_req())
            .finish()
    }
}

impl From<u32> for PeriCrg60 {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<PeriCrg60> for u32 {
    fn from(reg: PeriCrg60) -> Self {
        reg.0
    }
}
