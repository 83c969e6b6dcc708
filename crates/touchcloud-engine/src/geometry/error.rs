/// Failures while accumulating or uploading sketch geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A new cube would reference vertices past the 16-bit index range.
    #[error("cube indices would overflow u16 (buffer already holds {vertex_count} vertices)")]
    IndexOverflow { vertex_count: usize },

    /// The GPU copy of a sequence exceeds what the device can allocate.
    #[error("{kind} buffer of {size} bytes exceeds device limit of {limit} bytes")]
    BufferTooLarge {
        kind: &'static str,
        size: u64,
        limit: u64,
    },
}
