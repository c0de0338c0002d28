use thiserror::Error;

/// Errors surfaced by the conversion pipeline and its driver.
///
/// The converter is fail-soft for interactive inputs (a negative tolerance
/// is coerced, not rejected), so this enum only covers contract violations
/// at the API seams.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A document build was requested before any source image was loaded.
    #[error("no source image has been loaded")]
    MissingImage,

    /// The raw byte vector cannot back an RGBA image of the declared size.
    #[error("{actual} bytes cannot back a {width}x{height} RGBA buffer (expected {expected})")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A buffer dimension exceeds the fixed maximum square dimension.
    /// Callers are responsible for resizing before handing the buffer over.
    #[error("image dimension {dimension} exceeds the {max} pixel cap")]
    DimensionTooLarge { dimension: u32, max: u32 },

    /// A buffer dimension is zero.
    #[error("image has a zero dimension")]
    EmptyDimension,

    /// The driver actor is no longer running.
    #[error("the pipeline driver has stopped")]
    DriverStopped,
}
