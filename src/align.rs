/// Every block size stored in the heap is a multiple of this many bytes.
pub const PADDING: usize = 16;

/// Rounds the given size up to the next multiple of [`PADDING`].
///
/// The caller is responsible for keeping `$value` small enough that the
/// addition cannot overflow.
///
/// # Examples
///
/// ```rust
/// use mmalloc::align;
///
/// assert_eq!(align!(0), 0);
/// assert_eq!(align!(1), 16);
/// assert_eq!(align!(16), 16);
/// assert_eq!(align!(17), 32);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + $crate::align::PADDING - 1) & !($crate::align::PADDING - 1)
  };
}
