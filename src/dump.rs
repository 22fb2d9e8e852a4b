use std::fmt;

use crate::{heap::Heap, provider::HeapProvider};

/// Renders the block list as `[size,status] -> [size,status]`, or `[empty]`
/// when the heap has not been mapped yet.
pub struct Dump<'a, P: HeapProvider>(&'a Heap<P>);

impl<P: HeapProvider> fmt::Display for Dump<'_, P> {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    let mut blocks = self.0.blocks().peekable();

    if blocks.peek().is_none() {
      return f.write_str("[empty]");
    }

    while let Some(block) = blocks.next() {
      let status = if block.in_use { "used" } else { "free" };
      write!(f, "[{},{}]", block.size, status)?;

      if blocks.peek().is_some() {
        f.write_str(" -> ")?;
      }
    }

    Ok(())
  }
}

impl<P: HeapProvider> Heap<P> {
  pub fn dump(&self) -> Dump<'_, P> {
    Dump(self)
  }
}

/// Prints the block list of `heap` on its own line.
pub fn print_data<P: HeapProvider>(heap: &Heap<P>) {
  println!("{}", heap.dump());
}

#[cfg(test)]
mod tests {
  use crate::{block::HEADER_SIZE, config::HeapConfig};

  use super::*;

  #[test_log::test]
  fn test_dump_empty() {
    let heap = Heap::new();

    assert_eq!(heap.dump().to_string(), "[empty]");
  }

  #[test_log::test]
  fn test_dump_single_block() {
    let mut heap = Heap::with_config(HeapConfig::new(128).unwrap());
    heap.allocate(128 - HEADER_SIZE).unwrap();

    assert_eq!(heap.dump().to_string(), format!("[{},used]", 128 - HEADER_SIZE));
  }

  #[test_log::test]
  fn test_dump_after_release() {
    let mut heap = Heap::new();
    let remainder = 1024 - 2 * HEADER_SIZE - 512;

    let address = heap.allocate(512).unwrap();
    assert_eq!(
      heap.dump().to_string(),
      format!("[512,used] -> [{},free]", remainder)
    );

    heap.release(address).unwrap();
    assert_eq!(
      heap.dump().to_string(),
      format!("[512,free] -> [{},free]", remainder)
    );
  }
}
