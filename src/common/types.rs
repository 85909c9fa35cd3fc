/// Buffer pool frame ID type
pub type FrameId = u32;

/// Logical access timestamp type
pub type Timestamp = u64;
