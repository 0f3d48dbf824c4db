//! `upgrade_bundle`: pack boot/kernel/rootfs images into a flashable bundle.
//!
//! ```text
//! USAGE:
//!   upgrade_bundle -o out.bin -k uImage -r rootfs.squashfs [-f 16MB] [-p]
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use upgrade_bundle::{write_bundle, BundleOptions, FlashLayout};

#[derive(Parser)]
#[command(name = "upgrade_bundle", about = "Firmware upgrade bundle packer", version)]
struct Cli {
    /// U-Boot image file.
    #[arg(short, long)]
    boot: Option<PathBuf>,
    /// Kernel image file.
    #[arg(short, long)]
    kernel: Option<PathBuf>,
    /// Root filesystem image file.
    #[arg(short, long)]
    rootfs: Option<PathBuf>,
    /// Output filename.
    #[arg(short, long)]
    output: PathBuf,
    /// CMA allocator parameters appended to the kernel command line.
    #[arg(short, long)]
    cma: Option<String>,
    /// Add init=/init to the kernel command line.
    #[arg(short, long)]
    init: bool,
    /// Pack partitions tightly.
    #[arg(short, long)]
    pack: bool,
    /// Flash size: 8MB (default) or 16MB.
    #[arg(short, long, default_value_t = FlashLayout::Nor8M)]
    flash: FlashLayout,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let opts = BundleOptions {
        boot: cli.boot,
        kernel: cli.kernel,
        rootfs: cli.rootfs,
        cma: cli.cma,
        init: cli.init,
        pack: cli.pack,
        flash: cli.flash,
    };

    write_bundle(&opts, &cli.output)?;
    Ok(())
}
