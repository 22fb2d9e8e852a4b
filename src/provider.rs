use std::{io, ptr::NonNull};

use libc::{
  MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, c_void, mmap, munmap,
};
use log::warn;

use crate::error::{Error, Result};

/// Source of the single region a heap carves into blocks.
///
/// # Safety
///
/// [`Heap`](crate::Heap) writes block headers straight into the memory
/// returned by `map`, so a successful `map(len)` must return a pointer that:
///
/// - covers `len` readable and writable bytes,
/// - is aligned to at least 16 bytes,
/// - points to zeroed memory,
/// - stays valid and unaliased until it is passed to `unmap`.
///
/// Implementing the trait without `unsafe` is rejected:
///
/// ```compile_fail
/// use std::ptr::NonNull;
///
/// use mmalloc::{HeapProvider, Result};
///
/// struct Short;
///
/// impl HeapProvider for Short {
///   fn map(
///     &mut self,
///     _len: usize,
///   ) -> Result<NonNull<u8>> {
///     Ok(NonNull::dangling())
///   }
///
///   unsafe fn unmap(
///     &mut self,
///     _base: NonNull<u8>,
///     _len: usize,
///   ) {
///   }
/// }
/// ```
pub unsafe trait HeapProvider {
  /// Maps `len` zeroed, readable and writable bytes.
  fn map(
    &mut self,
    len: usize,
  ) -> Result<NonNull<u8>>;

  /// Returns a region obtained from [`HeapProvider::map`].
  ///
  /// # Safety
  ///
  /// `base` and `len` must come from a successful `map` call on this
  /// provider, and nothing may access the region afterwards.
  unsafe fn unmap(
    &mut self,
    base: NonNull<u8>,
    len: usize,
  );
}

/// Anonymous private memory from `mmap(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mmap;

unsafe impl HeapProvider for Mmap {
  fn map(
    &mut self,
    len: usize,
  ) -> Result<NonNull<u8>> {
    let address = unsafe {
      mmap(
        std::ptr::null_mut(),
        len,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if address == MAP_FAILED {
      let error = io::Error::last_os_error();
      warn!("mmap of {} bytes failed: {}", len, error);
      return Err(Error::MapFailed(error));
    }

    NonNull::new(address as *mut u8)
      .ok_or_else(|| Error::MapFailed(io::Error::other("mmap returned null")))
  }

  unsafe fn unmap(
    &mut self,
    base: NonNull<u8>,
    len: usize,
  ) {
    if unsafe { munmap(base.as_ptr() as *mut c_void, len) } != 0 {
      warn!("munmap of {} bytes failed: {}", len, io::Error::last_os_error());
    }
  }
}
