use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("requested size must be greater than zero")]
  InvalidSize,

  #[error("failed to map heap region: {0}")]
  MapFailed(#[source] io::Error),

  #[error("no free block can hold {requested} bytes")]
  OutOfMemory { requested: usize },

  #[error("pointer does not name a block of this heap")]
  InvalidPointer,

  #[error("block was already released")]
  DoubleRelease,

  #[error("invalid region size {size}")]
  InvalidRegionSize { size: usize },
}
