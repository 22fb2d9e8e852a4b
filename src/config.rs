use crate::{
  align::PADDING,
  block::HEADER_SIZE,
  error::{Error, Result},
};

/// Size of the region mapped on the first allocation.
pub const DEFAULT_REGION_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapConfig {
  region_size: usize,
}

impl HeapConfig {
  pub fn new(region_size: usize) -> Result<Self> {
    if region_size % PADDING != 0 || region_size < HEADER_SIZE + PADDING {
      return Err(Error::InvalidRegionSize { size: region_size });
    }

    Ok(Self { region_size })
  }

  pub fn region_size(&self) -> usize {
    self.region_size
  }
}

impl Default for HeapConfig {
  fn default() -> Self {
    Self {
      region_size: DEFAULT_REGION_SIZE,
    }
  }
}
