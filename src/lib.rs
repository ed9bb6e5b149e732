//! # rslab - A Single-Page Slab Allocator
//!
//! This crate provides a minimal **bump arena** (here called a slab) backed by
//! exactly one page of memory obtained from the OS with `mmap(2)`.
//!
//! ## Overview
//!
//! ```text
//!   Slab Concept:
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     ONE MAPPED PAGE (page_size bytes)                │
//!   │                                                                      │
//!   │   ┌─────┬─────┬─────┬─────┬───────────────────────────────────────┐  │
//!   │   │ A1  │ A2  │ A3  │ A4  │            Free Space                 │  │
//!   │   └─────┴─────┴─────┴─────┴───────────────────────────────────────┘  │
//!   │   ▲                       ▲                                       ▲  │
//!   │   │                       │                                       │  │
//!   │ start                   free                                    end  │
//!   │                       (next alloc)                                   │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   alloc(n): return `free`, then move it n bytes forward.   O(1)
//!   reset():  move `free` back to `start`.                    O(1)
//!   destroy(): munmap the page.
//! ```
//!
//! There is no free list and no per-allocation header: once bytes are handed
//! out the slab forgets about them until it is reset or destroyed.
//!
//! ## Crate Structure
//!
//! ```text
//!   rslab
//!   ├── align      - align_to! macro
//!   ├── error      - SlabError and Result
//!   ├── map        - mmap/munmap boundary (internal)
//!   ├── page       - PageSize discovery
//!   └── slab       - Slab implementation
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rslab::{PageSize, Slab};
//!
//! fn main() -> rslab::Result<()> {
//!     let page_size = PageSize::query()?;
//!     let mut slab = Slab::create(page_size)?;
//!
//!     let whole_page = slab.alloc(page_size.get());
//!     assert_eq!(whole_page, Some(slab.start()));
//!
//!     // Running out of room is not an error.
//!     assert!(slab.alloc(1).is_none());
//!
//!     slab.reset();
//!     let bytes = slab.alloc_slice(16).unwrap();
//!     bytes.fill(0xAB);
//!
//!     slab.destroy()
//! }
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!   PageSize::query() ──► Slab::create() ──► Live ──► destroy() / drop
//!                                            │  ▲
//!                                            └──┘
//!                                      alloc / reset
//! ```
//!
//! `destroy` takes the slab by value, so it cannot be used afterwards.
//! Dropping a slab without destroying it unmaps the page too, logging any
//! failure through the `log` facade.
//!
//! ## Limitations
//!
//! - **One page only**: requests larger than the page always fail
//! - **No individual frees**: only [`Slab::reset`] reclaims memory
//! - **Single-threaded**: `Slab` is not `Sync`, wrap it in a `Mutex` to share
//! - **Byte granularity**: [`Slab::alloc`] does not align, use
//!   [`Slab::alloc_layout`] when alignment matters
//! - **Unix-only**: requires `libc`, `mmap` and `munmap`
//!
//! ## Safety
//!
//! [`Slab::alloc`] returns raw pointers. They must not be dereferenced after
//! the slab is reset, destroyed or dropped. [`Slab::alloc_slice`] returns
//! borrowed slices instead, which the compiler keeps from outliving either.

pub mod align;
mod error;
mod map;
mod page;
mod slab;

pub use error::{Result, SlabError};
pub use page::PageSize;
pub use slab::Slab;
