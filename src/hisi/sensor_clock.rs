use log::debug;

use crate::error::RegisterError;
use crate::hisi::crg_registers::RegisterBus;
use crate::hisi::ispreg::PeriCrg60;

/// Gate or ungate both sensor 0 clocks without touching reset or source.
pub fn sensor0_clock_gate<B: RegisterBus + ?Sized>(bus: &B, enable: bool) -> Result<PeriCrg60, RegisterError> {
    let reg = PeriCrg60::modify(bus, |r| {
        Ok(r.with_sensor0_cken(enable).with_sensor0_ctrl_cken(enable))
    })?;
    debug!("PERI_CRG60 clock gate {} -> {:#010x}", enable, reg.bits());
    Ok(reg)
}

pub fn sensor0_select_clock<B: RegisterBus + ?Sized>(bus: &B, code: u8) -> Result<PeriCrg60, RegisterError> {
    let reg = PeriCrg60::modify(bus, |r| r.with_sensor0_cksel(code))?;
    debug!("PERI_CRG60 cksel {} -> {:#010x}", code, reg.bits());
    Ok(reg)
}

/// Full bring-up: hold both resets, program the clock source and open the
/// clock gates, then release the resets. Ends with resets deasserted and
/// clocks running.
pub fn sensor0_reset_cycle<B: RegisterBus + ?Sized>(bus: &B, code: u8) -> Result<PeriCrg60, RegisterError> {
    // Reject the code before any write reaches the register.
    PeriCrg60::default().with_sensor0_cksel(code)?;

    PeriCrg60::modify(bus, |r| {
        Ok(r.with_sensor0_srst_req(true).with_sensor0_ctrl_srst_req(true))
    })?;
    PeriCrg60::modify(bus, |r| {
        Ok(r.with_sensor0_cksel(code)?
            .with_sensor0_cken(true)
            .with_sensor0_ctrl_cken(true))
    })?;
    let reg = PeriCrg60::modify(bus, |r| {
        Ok(r.with_sensor0_srst_req(false).with_sensor0_ctrl_srst_req(false))
    })?;

    debug!("PERI_CRG60 sensor0 reset cycle done: {:?}", reg);
    Ok(reg)
}
