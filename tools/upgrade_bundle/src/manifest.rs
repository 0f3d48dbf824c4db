use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

pub const KERNEL_MEM_OS: &str = "${osmem}";
pub const KERNEL_MEM_TOTAL: &str = "${totalmem}";
pub const MTD_PREFIX: &str = "hi_sfc:";
pub const DEFAULT_OSMEM: &str = "32M";

/// JSON header at the start of an upgrade bundle. Field order is the
/// order the bootloader-side parser was written against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub kernel_mem: String,
    pub set_total_mem: bool,
    pub mtd_prefix: String,
    pub osmem: String,
    pub partitions: Vec<PartitionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_cmdline: Option<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            kernel_mem: KERNEL_MEM_OS.to_string(),
            set_total_mem: true,
            mtd_prefix: MTD_PREFIX.to_string(),
            osmem: DEFAULT_OSMEM.to_string(),
            partitions: Vec::new(),
            skip: None,
            additional_cmdline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionEntry {
    pub name: String,
    pub payload_size: u64,
    pub sha1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_size: Option<u64>,
}

/// Separators `", "` and `": "` on a single line, non-ASCII escaped as
/// `\uXXXX` UTF-16 units, as in bundles already deployed to boards.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for run in fragment.split_inclusive(|c: char| !c.is_ascii()) {
            let (ascii, wide) = match run.char_indices().last() {
                Some((at, c)) if !c.is_ascii() => (&run[..at], Some(c)),
                _ => (run, None),
            };
            writer.write_all(ascii.as_bytes())?;
            if let Some(c) = wide {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

impl Manifest {
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        self.serialize(&mut ser)?;
        Ok(out)
    }

    pub fn payload_len(&self) -> u64 {
        self.partitions.iter().map(|p| p.payload_size).sum()
    }
}
