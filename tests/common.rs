#![allow(dead_code)]

use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Mutex, MutexGuard};

use hisi_platform::{RegAddr, RegisterBus, RegisterError, CV300_CRG_BASE};

const MMIO_WORDS: usize = 1024;

lazy_static::lazy_static! {
    static ref MMIO_MEMORY: Mutex<[u32; MMIO_WORDS]> = Mutex::new([0u32; MMIO_WORDS]);
    static ref MMIO_WRITES: Mutex<Vec<(RegAddr, u32)>> = Mutex::new(Vec::new());
    static ref MMIO_LOCK: Mutex<()> = Mutex::new(());
}

fn word_index(address: RegAddr) -> Option<usize> {
    if address < CV300_CRG_BASE || address % 4 != 0 {
        return None;
    }
    let index = (address - CV300_CRG_BASE) >> 2;
    (index < MMIO_WORDS).then_some(index)
}

/// Serialises tests that share the mock CRG window.
pub fn mmio_session() -> MutexGuard<'static, ()> {
    let guard = MMIO_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    mmio_reset();
    guard
}

pub fn mmio_write(address: RegAddr, value: u32) {
    if let Some(index) = word_index(address) {
        let mut mem = MMIO_MEMORY.lock().unwrap_or_else(|e| e.into_inner());
        mem[index] = value;
    }
}

pub fn mmio_read(address: RegAddr) -> u32 {
    match word_index(address) {
        Some(index) => MMIO_MEMORY.lock().unwrap_or_else(|e| e.into_inner())[index],
        None => 0,
    }
}

pub fn mmio_writes() -> Vec<(RegAddr, u32)> {
    MMIO_WRITES.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

pub fn mmio_reset() {
    let mut mem = MMIO_MEMORY.lock().unwrap_or_else(|e| e.into_inner());
    for v in mem.iter_mut() {
        *v = 0;
    }
    MMIO_WRITES.lock().unwrap_or_else(|e| e.into_inner()).clear();
}

/// CRG window backed by the mock memory, recording every write.
pub struct MockBus;

impl RegisterBus for MockBus {
    fn read32(&self, addr: RegAddr) -> Result<u32, RegisterError> {
        word_index(addr).ok_or(RegisterError::Unmapped { addr })?;
        Ok(mmio_read(addr))
    }

    fn write32(&self, addr: RegAddr, value: u32) -> Result<(), RegisterError> {
        word_index(addr).ok_or(RegisterError::Unmapped { addr })?;
        mmio_write(addr, value);
        MMIO_WRITES
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((addr, value));
        Ok(())
    }
}

pub const CHILD_ENV: &str = "HISI_PLATFORM_CHILD";

/// Re-run the current test binary limited to `test_name`, flagged as a child.
pub fn run_child(test_name: &str) -> ExitStatus {
    let exe = std::env::current_exe().expect("test binary path");
    Command::new(exe)
        .args(["--exact", test_name, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, test_name)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("spawn child test process")
}

pub fn is_child(test_name: &str) -> bool {
    std::env::var(CHILD_ENV).map(|v| v == test_name).unwrap_or(false)
}
