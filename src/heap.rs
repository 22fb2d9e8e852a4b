use std::{marker::PhantomData, ptr::NonNull};

use log::{debug, trace};

use crate::{
  align,
  align::PADDING,
  block::{Block, HEADER_SIZE, NIL, block_offset, data_offset},
  config::HeapConfig,
  error::{Error, Result},
  provider::{HeapProvider, Mmap},
};

/// The mapped region: its base address and the offset one past its end.
#[derive(Debug, Clone, Copy)]
struct Region {
  base: NonNull<u8>,
  end: usize,
}

impl Region {
  fn read(
    &self,
    offset: usize,
  ) -> Block {
    debug_assert!(offset + HEADER_SIZE <= self.end);
    unsafe { self.base.as_ptr().add(offset).cast::<Block>().read() }
  }

  fn write(
    &self,
    offset: usize,
    block: Block,
  ) {
    debug_assert!(offset + HEADER_SIZE <= self.end);
    unsafe { self.base.as_ptr().add(offset).cast::<Block>().write(block) }
  }

  fn data(
    &self,
    block: usize,
  ) -> NonNull<u8> {
    unsafe { self.base.add(data_offset(block)) }
  }

  fn offset_of(
    &self,
    address: NonNull<u8>,
  ) -> Option<usize> {
    (address.as_ptr() as usize)
      .checked_sub(self.base.as_ptr() as usize)
      .filter(|offset| *offset < self.end)
  }
}

/// A snapshot of one block header, as seen while walking the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
  /// Offset of the header from the start of the region.
  pub offset: usize,
  /// Usable bytes after the header.
  pub size: usize,
  pub in_use: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
  pub blocks: usize,
  pub free_bytes: usize,
  pub used_bytes: usize,
}

/// Walks the free list from `head` in list order.
pub struct Blocks<'a> {
  region: Option<Region>,
  next: Option<usize>,
  _heap: PhantomData<&'a ()>,
}

impl Iterator for Blocks<'_> {
  type Item = BlockInfo;

  fn next(&mut self) -> Option<Self::Item> {
    let region = self.region?;
    let offset = self.next?;
    let block = region.read(offset);

    self.next = block.next();

    Some(BlockInfo {
      offset,
      size: block.size,
      in_use: block.in_use,
    })
  }
}

/// First-fit, splitting heap over a single region.
///
/// The region is requested from the provider on the first call to
/// [`Heap::allocate`] and never grows. Released blocks are flagged free and
/// stay in the list as they are; neighbouring free blocks are not merged.
pub struct Heap<P: HeapProvider = Mmap> {
  provider: P,
  config: HeapConfig,
  region: Option<Region>,
  head: Option<usize>,
}

impl Heap<Mmap> {
  pub fn new() -> Self {
    Self::with_config(HeapConfig::default())
  }

  pub fn with_config(config: HeapConfig) -> Self {
    Self::with_provider(config, Mmap)
  }
}

impl Default for Heap<Mmap> {
  fn default() -> Self {
    Self::new()
  }
}

impl<P: HeapProvider> Heap<P> {
  pub fn with_provider(
    config: HeapConfig,
    provider: P,
  ) -> Self {
    Self {
      provider,
      config,
      region: None,
      head: None,
    }
  }

  pub fn config(&self) -> &HeapConfig {
    &self.config
  }

  pub fn provider(&self) -> &P {
    &self.provider
  }

  /// Whether the region has been mapped and the list built.
  pub fn is_initialized(&self) -> bool {
    self.head.is_some()
  }

  /// Returns the region, mapping it and creating the first block if this is
  /// the first successful call. A failed mapping leaves the heap untouched so
  /// the next call tries again.
  fn region(&mut self) -> Result<Region> {
    if let (Some(region), Some(_)) = (self.region, self.head) {
      return Ok(region);
    }

    let len = self.config.region_size();
    let base = self.provider.map(len)?;
    let region = Region { base, end: len };

    region.write(0, Block::new(len - HEADER_SIZE, false, NIL));

    debug!("Mapped {} byte heap at {:?}", len, base);

    self.region = Some(region);
    self.head = Some(0);

    Ok(region)
  }

  fn find_first_fit(
    &self,
    size: usize,
  ) -> Option<usize> {
    self
      .blocks()
      .inspect(|block| trace!("Checking block {:?} for {} bytes", block, size))
      .find(|block| !block.in_use && block.size >= size)
      .map(|block| block.offset)
  }

  /// Carves the free block at `offset` into a front block of exactly `size`
  /// bytes and a free remainder placed right after it.
  fn split(
    &mut self,
    region: Region,
    offset: usize,
    size: usize,
  ) {
    let block = region.read(offset);
    let remainder = data_offset(offset) + size;
    let remaining = block.size - size - HEADER_SIZE;

    debug!(
      "Splitting block at {}: {} -> {} + {} + {}",
      offset, block.size, size, HEADER_SIZE, remaining
    );

    region.write(remainder, Block::new(remaining, false, block.next));
    region.write(offset, Block::new(size, block.in_use, remainder));
  }

  /// Allocates at least `size` bytes and returns a pointer to them.
  ///
  /// The request is padded to a multiple of 16 bytes and served by the first
  /// free block that can hold it. A block with room for another header and
  /// 16 more bytes is split, otherwise it is handed out whole.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Result<NonNull<u8>> {
    if size == 0 {
      return Err(Error::InvalidSize);
    }

    let region = self.region()?;

    if size > region.end {
      return Err(Error::OutOfMemory { requested: size });
    }

    let padded = align!(size);

    let Some(offset) = self.find_first_fit(padded) else {
      debug!("No free block for {} bytes", padded);
      return Err(Error::OutOfMemory { requested: size });
    };

    if region.read(offset).size >= padded + HEADER_SIZE + PADDING {
      self.split(region, offset, padded);
    }

    let mut block = region.read(offset);
    block.in_use = true;
    region.write(offset, block);

    debug!("Allocated {} bytes in block at {} ({} usable)", size, offset, block.size);

    Ok(region.data(offset))
  }

  /// Marks the block owning `address` as free.
  ///
  /// `address` must be a pointer returned by [`Heap::allocate`] on this heap
  /// that has not been released since.
  pub fn release(
    &mut self,
    address: NonNull<u8>,
  ) -> Result<()> {
    let region = self.region.ok_or(Error::InvalidPointer)?;

    let offset = region
      .offset_of(address)
      .and_then(block_offset)
      .ok_or(Error::InvalidPointer)?;

    if !self.blocks().any(|block| block.offset == offset) {
      return Err(Error::InvalidPointer);
    }

    let mut block = region.read(offset);

    if !block.in_use {
      return Err(Error::DoubleRelease);
    }

    block.in_use = false;
    region.write(offset, block);

    debug!("Released block at {} ({} bytes)", offset, block.size);

    Ok(())
  }

  pub fn blocks(&self) -> Blocks<'_> {
    Blocks {
      region: self.region,
      next: self.head,
      _heap: PhantomData,
    }
  }

  pub fn stats(&self) -> HeapStats {
    self.blocks().fold(HeapStats::default(), |mut stats, block| {
      stats.blocks += 1;

      if block.in_use {
        stats.used_bytes += block.size;
      } else {
        stats.free_bytes += block.size;
      }

      stats
    })
  }
}

impl<P: HeapProvider> Drop for Heap<P> {
  fn drop(&mut self) {
    self.head = None;

    if let Some(region) = self.region.take() {
      unsafe { self.provider.unmap(region.base, region.end) };
    }
  }
}
