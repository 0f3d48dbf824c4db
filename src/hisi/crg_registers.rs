use core::ptr::NonNull;
use volatile::VolatilePtr;

use crate::error::RegisterError;

pub type RegAddr = usize;

/// 32-bit register access, addressed by physical address.
pub trait RegisterBus {
    fn read32(&self, addr: RegAddr) -> Result<u32, RegisterError>;
    fn write32(&self, addr: RegAddr, value: u32) -> Result<(), RegisterError>;

    fn set_bits(&self, addr: RegAddr, mask: u32) -> Result<(), RegisterError> {
        let val = self.read32(addr)?;
        self.write32(addr, val | mask)
    }

    fn clear_bits(&self, addr: RegAddr, mask: u32) -> Result<(), RegisterError> {
        let val = self.read32(addr)?;
        self.write32(addr, val & !mask)
    }

    fn write_field(&self, addr: RegAddr, mask: u32, shift: u8, value: u32) -> Result<(), RegisterError> {
        let mut val = self.read32(addr)?;
        val &= !mask;
        val |= (value << shift) & mask;
        self.write32(addr, val)
    }

    fn read_field(&self, addr: RegAddr, mask: u32, shift: u8) -> Result<u32, RegisterError> {
        Ok((self.read32(addr)? & mask) >> shift)
    }
}

/// Volatile access into a mapped window of physical register space.
///
/// The window covers `[phys_base, phys_base + len)` and is reachable at
/// `virt_base` in the current address space. Bare metal runs with
/// `virt_base == phys_base`; a Linux userspace tool passes the pointer
/// returned by mmap of /dev/mem.
#[derive(Debug)]
pub struct MmioBus {
    phys_base: RegAddr,
    virt_base: usize,
    len: usize,
}

impl MmioBus {
    /// Size of the CRG register block.
    pub const CRG_WINDOW_LEN: usize = 0x1000;

    /// # Safety
    ///
    /// The physical range must be identity mapped, device memory, and not
    /// aliased by another owner expecting exclusive access.
    pub const unsafe fn identity(phys_base: RegAddr, len: usize) -> Self {
        Self { phys_base, virt_base: phys_base, len }
    }

    /// # Safety
    ///
    /// `virt_base` must point at a live mapping of `len` bytes of the
    /// physical range starting at `phys_base` for the lifetime of the bus.
    pub const unsafe fn remapped(phys_base: RegAddr, virt_base: usize, len: usize) -> Self {
        Self { phys_base, virt_base, len }
    }

    pub fn contains(&self, addr: RegAddr) -> bool {
        addr % 4 == 0
            && addr
                .checked_sub(self.phys_base)
                .and_then(|offset| offset.checked_add(4))
                .is_some_and(|end| end <= self.len)
    }

    pub fn translate(&self, addr: RegAddr) -> Result<usize, RegisterError> {
        if !self.contains(addr) {
            return Err(RegisterError::Unmapped { addr });
        }
        self.virt_base
            .checked_add(addr - self.phys_base)
            .ok_or(RegisterError::Unmapped { addr })
    }

    fn reg(&self, addr: RegAddr) -> Result<VolatilePtr<'_, u32>, RegisterError> {
        let virt = self.translate(addr)?;
        let ptr = NonNull::new(virt as *mut u32).ok_or(RegisterError::Unmapped { addr })?;
        // SAFETY: the constructor contract guarantees the window is mapped,
        // and translate() kept the access aligned and inside it.
        Ok(unsafe { VolatilePtr::new(ptr) })
    }
}

impl RegisterBus for MmioBus {
    #[inline(always)]
    fn read32(&self, addr: RegAddr) -> Result<u32, RegisterError> {
        Ok(self.reg(addr)?.read())
    }

    #[inline(always)]
    fn write32(&self, addr: RegAddr, value: u32) -> Result<(), RegisterError> {
        self.reg(addr)?.write(value);
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}
