use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("flash must be 8MB or 16MB, got {0:?}")]
    UnsupportedFlash(String),
    #[error("{name} image is {size:#x} bytes, partition holds {limit:#x}")]
    ImageTooLarge {
        name: &'static str,
        size: u64,
        limit: u64,
    },
}
