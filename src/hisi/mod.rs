pub mod crg_registers;
pub mod ispreg;
pub mod sensor_clock;

pub use self::crg_registers::{MmioBus, RegAddr, RegisterBus};
pub use self::ispreg::{PeriCrg60, EV300_PERI_CRG60};
pub use self::sensor_clock::{sensor0_clock_gate, sensor0_reset_cycle, sensor0_select_clock};
