use std::mem;

use crate::align::PADDING;

/// Offset stored in [`Block::next`] by the last block of the list.
pub const NIL: usize = usize::MAX;

/// Bytes occupied by a block header in front of every data region.
pub const HEADER_SIZE: usize = mem::size_of::<Block>();

const _: () = assert!(HEADER_SIZE % PADDING == 0);

/// Header overlaid on the region at the start of every block.
///
/// `next` is the region offset of the following header, or [`NIL`].
/// `size` counts the data bytes after the header and is always padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Block {
  pub next: usize,
  pub size: usize,
  pub in_use: bool,
}

impl Block {
  pub fn new(
    size: usize,
    in_use: bool,
    next: usize,
  ) -> Self {
    Self { next, size, in_use }
  }

  pub fn next(&self) -> Option<usize> {
    (self.next != NIL).then_some(self.next)
  }
}

/// Offset of the data region belonging to the header at `block`.
pub fn data_offset(block: usize) -> usize {
  block + HEADER_SIZE
}

/// Offset of the header owning the data region at `data`.
///
/// Returns `None` when no header could fit in front of `data`.
pub fn block_offset(data: usize) -> Option<usize> {
  data.checked_sub(HEADER_SIZE)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_header_is_padded() {
    assert_eq!(HEADER_SIZE % PADDING, 0);
    assert!(HEADER_SIZE >= mem::size_of::<usize>() * 2 + 1);
  }

  #[test]
  fn test_offsets_round_trip() {
    for block in [0, 32, 64, 560, 992] {
      assert_eq!(Some(block), block_offset(data_offset(block)));
    }
  }

  #[test]
  fn test_block_offset_underflow() {
    assert_eq!(None, block_offset(HEADER_SIZE - 1));
    assert_eq!(Some(0), block_offset(HEADER_SIZE));
  }

  #[test]
  fn test_next_sentinel() {
    assert_eq!(None, Block::new(16, false, NIL).next());
    assert_eq!(Some(48), Block::new(16, true, 48).next());
  }
}
