use thiserror::Error;
use crate::common::types::FrameId;

#[derive(Error, Debug)]
pub enum ReplacerError {
    #[error("Invalid frame ID: {0}")]
    InvalidFrame(FrameId),
    #[error("Cannot remove frame {0} because it is pinned")]
    IllegalRemoval(FrameId),
}
