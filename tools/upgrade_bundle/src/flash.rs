use core::fmt;
use core::str::FromStr;

use crate::error::BundleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Boot,
    Kernel,
    Rootfs,
}

impl PartitionKind {
    /// Order partitions appear in the manifest and in the payload.
    pub const ALL: [PartitionKind; 3] = [PartitionKind::Boot, PartitionKind::Kernel, PartitionKind::Rootfs];

    pub fn name(&self) -> &'static str {
        match self {
            PartitionKind::Boot => "boot",
            PartitionKind::Kernel => "kernel",
            PartitionKind::Rootfs => "rootfs",
        }
    }
}

/// SPI-NOR flash size of the target board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashLayout {
    #[default]
    Nor8M,
    Nor16M,
}

impl FlashLayout {
    pub fn partition_size(&self, kind: PartitionKind) -> u64 {
        match (self, kind) {
            (_, PartitionKind::Boot) => 0x40000,
            (FlashLayout::Nor8M, PartitionKind::Kernel) => 0x200000,
            (FlashLayout::Nor8M, PartitionKind::Rootfs) => 0x500000,
            (FlashLayout::Nor16M, PartitionKind::Kernel) => 0x300000,
            (FlashLayout::Nor16M, PartitionKind::Rootfs) => 0xA00000,
        }
    }
}

impl FromStr for FlashLayout {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "8MB" => Ok(FlashLayout::Nor8M),
            "16MB" => Ok(FlashLayout::Nor16M),
            other => Err(BundleError::UnsupportedFlash(other.to_string())),
        }
    }
}

impl fmt::Display for FlashLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashLayout::Nor8M => f.write_str("8MB"),
            FlashLayout::Nor16M => f.write_str("16MB"),
        }
    }
}
