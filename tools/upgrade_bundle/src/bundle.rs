use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use crate::error::BundleError;
use crate::flash::{FlashLayout, PartitionKind};
use crate::manifest::{Manifest, PartitionEntry, KERNEL_MEM_TOTAL};

const SKIP_WITHOUT_BOOT: [&str; 2] = ["boot", "env"];
const INIT_CMDLINE: &str = "init=/init";

#[derive(Debug, Clone, Default)]
pub struct BundleOptions {
    pub boot: Option<PathBuf>,
    pub kernel: Option<PathBuf>,
    pub rootfs: Option<PathBuf>,
    pub cma: Option<String>,
    pub init: bool,
    /// Drop partition sizes (and their size checks) for everything but boot.
    pub pack: bool,
    pub flash: FlashLayout,
}

impl BundleOptions {
    pub fn image_path(&self, kind: PartitionKind) -> Option<&Path> {
        match kind {
            PartitionKind::Boot => self.boot.as_deref(),
            PartitionKind::Kernel => self.kernel.as_deref(),
            PartitionKind::Rootfs => self.rootfs.as_deref(),
        }
    }

    fn cmdline(&self) -> Option<String> {
        let mut tokens: Vec<&str> = Vec::new();
        if self.init {
            tokens.push(INIT_CMDLINE);
        }
        if let Some(cma) = self.cma.as_deref().filter(|c| !c.is_empty()) {
            tokens.push(cma);
        }
        if tokens.is_empty() {
            None
        } else {
            Some(tokens.join(" "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionImage {
    pub kind: PartitionKind,
    pub data: Vec<u8>,
}

/// First eight hex digits of the SHA-1 of `data`.
pub fn short_sha1(data: &[u8]) -> String {
    let digest = Sha1::digest(data);
    let mut hex = hex::encode(digest);
    hex.truncate(8);
    hex
}

pub fn build_manifest(opts: &BundleOptions, images: &[PartitionImage]) -> Result<Manifest, BundleError> {
    let mut manifest = Manifest::default();

    if opts.boot.is_none() {
        manifest.skip = Some(SKIP_WITHOUT_BOOT.iter().map(|s| s.to_string()).collect());
    }
    if opts.cma.as_deref().is_some_and(|c| !c.is_empty()) {
        manifest.kernel_mem = KERNEL_MEM_TOTAL.to_string();
    }
    manifest.additional_cmdline = opts.cmdline();

    for image in images {
        let size = image.data.len() as u64;
        let mut entry = PartitionEntry {
            name: image.kind.name().to_string(),
            payload_size: size,
            sha1: short_sha1(&image.data),
            partition_size: None,
        };
        if !opts.pack || image.kind == PartitionKind::Boot {
            let limit = opts.flash.partition_size(image.kind);
            if size > limit {
                return Err(BundleError::ImageTooLarge {
                    name: image.kind.name(),
                    size,
                    limit,
                });
            }
            entry.partition_size = Some(limit);
        }
        debug!(?entry, "partition added");
        manifest.partitions.push(entry);
    }

    Ok(manifest)
}

/// Manifest JSON, one NUL byte, then every image in manifest order.
pub fn write_bundle_to<W: Write>(manifest: &Manifest, images: &[PartitionImage], out: &mut W) -> Result<()> {
    let header = manifest.to_json_bytes().context("serialize manifest")?;
    out.write_all(&header)?;
    out.write_all(&[0u8])?;
    for image in images {
        out.write_all(&image.data)?;
    }
    out.flush()?;
    Ok(())
}

pub fn load_images(opts: &BundleOptions) -> Result<Vec<PartitionImage>> {
    let mut images = Vec::new();
    for kind in PartitionKind::ALL {
        if let Some(path) = opts.image_path(kind) {
            let data = fs::read(path)
                .with_context(|| format!("read {} image {}", kind.name(), path.display()))?;
            images.push(PartitionImage { kind, data });
        }
    }
    Ok(images)
}

pub fn write_bundle(opts: &BundleOptions, output: &Path) -> Result<Manifest> {
    let images = load_images(opts)?;
    let manifest = build_manifest(opts, &images)?;
    for entry in &manifest.partitions {
        info!(
            name = %entry.name,
            payload_size = entry.payload_size,
            sha1 = %entry.sha1,
            partition_size = ?entry.partition_size,
            "partition"
        );
    }

    let file = File::create(output).with_context(|| format!("create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_bundle_to(&manifest, &images, &mut writer)
        .with_context(|| format!("write {}", output.display()))?;
    info!(output = %output.display(), flash = %opts.flash, "bundle written");
    Ok(manifest)
}
