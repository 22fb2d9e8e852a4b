//! # mmalloc - A First-Fit Free-List Allocator
//!
//! This crate provides a small **free-list allocator** that carves a single
//! region obtained from `mmap(2)` into blocks, hands them out first-fit and
//! splits blocks that are larger than needed.
//!
//! ## Overview
//!
//! The region is mapped on the first allocation and never grows:
//!
//! ```text
//!   Heap Region (1024 bytes by default):
//!
//!   ┌────────┬──────────────┬────────┬──────────────┬────────┬─────────────┐
//!   │ Header │     Data     │ Header │     Data     │ Header │    Data     │
//!   │  used  │              │  free  │              │  free  │             │
//!   └───┬────┴──────────────┴───▲─┬──┴──────────────┴───▲────┴─────────────┘
//!       │                       │ │                     │
//!       └───────── next ────────┘ └─────── next ────────┘
//!   ▲
//!   └── head (offset 0)
//! ```
//!
//! Every header stores the number of data bytes following it, whether the
//! block is in use and the offset of the next header. Headers and sizes are
//! multiples of 16 bytes, so every data pointer is 16 byte aligned.
//!
//! ## Crate Structure
//!
//! ```text
//!   mmalloc
//!   ├── align      - Padding macro (align!)
//!   ├── block      - Block header and header/data offset arithmetic
//!   ├── config     - Region size
//!   ├── dump       - `[size,status] -> ...` rendering of the block list
//!   ├── error      - Error type
//!   ├── heap       - Heap: first-fit search, splitting and release
//!   └── provider   - HeapProvider trait and the mmap backed provider
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mmalloc::Heap;
//!
//! fn main() -> mmalloc::Result<()> {
//!     let mut heap = Heap::new();
//!
//!     let ptr = heap.allocate(512)?;
//!     println!("{}", heap.dump()); // [512,used] -> [448,free]
//!
//!     heap.release(ptr)?;
//!     println!("{}", heap.dump()); // [512,free] -> [448,free]
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Splitting
//!
//! A request is padded to a multiple of 16 bytes. When the first free block
//! that fits has room for the request, another header and at least 16 more
//! bytes, the tail becomes a new free block:
//!
//! ```text
//!   Before:
//!   ┌────────┬──────────────────────────────────────────────────┐
//!   │ Header │                 992 bytes free                   │
//!   └────────┴──────────────────────────────────────────────────┘
//!
//!   allocate(500):
//!   ┌────────┬─────────────────────────┬────────┬───────────────┐
//!   │ Header │      512 bytes used     │ Header │ 448 bytes free│
//!   └────────┴─────────────────────────┴────────┴───────────────┘
//! ```
//!
//! Otherwise the whole block is handed out and the slack stays unused until
//! the block is released.
//!
//! ## Limitations
//!
//! - **Fixed capacity**: The region is mapped once; exhaustion is an error
//! - **No coalescing**: Adjacent free blocks are never merged, so a request
//!   can fail even when neighbouring free blocks would jointly hold it
//! - **Single-threaded only**: `Heap` is neither `Send` nor `Sync`
//! - **Unix-only**: Requires `libc` and `mmap`
//!
//! ## Safety
//!
//! Allocation and release are safe calls: `release` checks that the pointer
//! names a live block of the heap before touching it. Reading or writing
//! through a returned pointer is up to the caller, who may only use the
//! requested number of bytes and only until the block is released or the
//! heap is dropped. Custom [`HeapProvider`]s are `unsafe impl`s: the heap
//! trusts the region they hand back.

pub mod align;
mod block;
mod config;
mod dump;
mod error;
mod heap;
mod provider;

pub use block::HEADER_SIZE;
pub use config::{DEFAULT_REGION_SIZE, HeapConfig};
pub use dump::{Dump, print_data};
pub use error::{Error, Result};
pub use heap::{BlockInfo, Blocks, Heap, HeapStats};
pub use provider::{HeapProvider, Mmap};
