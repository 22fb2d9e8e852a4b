use std::io::Read;

use mmalloc::{Heap, print_data};

/// Waits until the user presses ENTER, so the mapping can be inspected with
/// tools like `pmap` or `gdb` between steps.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn main() -> mmalloc::Result<()> {
  env_logger::init();

  let mut heap = Heap::new();

  println!("[start] PID = {}", std::process::id());
  print_data(&heap);
  block_until_enter_pressed();

  // The first allocation maps the region and splits its only block.
  let data = heap.allocate(512)?;
  println!("\n[1] Allocate 512 bytes at {:?}", data);
  print_data(&heap);

  unsafe { data.as_ptr().write_bytes(0xAB, 512) };
  block_until_enter_pressed();

  // Releasing only flips the flag; the block keeps its size.
  heap.release(data)?;
  println!("\n[2] Released {:?}", data);
  print_data(&heap);

  Ok(())
}
