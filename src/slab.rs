use std::{alloc::Layout, cell::Cell, ptr::NonNull};

use log::trace;

use crate::{align_to, error::Result, map::Region, page::PageSize};

/// A single-page bump arena.
///
/// ```text
///   start                 free                              end
///     │                     │                                 │
///     ▼                     ▼                                 ▼
///     ┌─────┬──────┬────────┬─────────────────────────────────┐
///     │ A1  │  A2  │   A3   │           remaining             │
///     └─────┴──────┴────────┴─────────────────────────────────┘
///     ◄──────── used ──────►◄────────── remaining ───────────►
/// ```
///
/// Allocation only moves `free` forward. [`Slab::reset`] moves it back to
/// `start`, and [`Slab::destroy`] returns the page to the OS. The slab keeps
/// no record of individual allocations.
///
/// `Slab` is `Send` but not `Sync`: to share one between threads, put it
/// behind a `Mutex`.
pub struct Slab {
  region: Region,
  free: Cell<usize>,
}

impl Slab {
  /// Maps one page of `page_size` bytes and returns an empty slab over it.
  ///
  /// The page is zero-filled by the OS. That only holds until the first
  /// [`reset`](Slab::reset): memory handed out afterwards may still hold
  /// whatever was written before.
  pub fn create(page_size: PageSize) -> Result<Self> {
    let region = Region::map(page_size.get())?;

    Ok(Self {
      region,
      free: Cell::new(0),
    })
  }

  /// Hands out `size` bytes and returns their base address, which is the
  /// value of [`free`](Slab::free) before the call.
  ///
  /// Returns `None` when fewer than `size` bytes remain. A zero-sized request
  /// always succeeds and leaves `free` where it is. No alignment is applied,
  /// see [`alloc_layout`](Slab::alloc_layout) for that.
  ///
  /// The memory stays valid until the slab is reset, destroyed or dropped.
  pub fn alloc(
    &self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    let offset = self.bump(self.free.get(), size)?;
    Some(self.address(offset))
  }

  /// Like [`alloc`](Slab::alloc), but returns the bytes as a slice borrowed
  /// from the slab, so they cannot be touched after a reset.
  #[allow(clippy::mut_from_ref)]
  pub fn alloc_slice(
    &self,
    size: usize,
  ) -> Option<&mut [u8]> {
    let offset = self.bump(self.free.get(), size)?;

    // `bump` never hands out the same bytes twice between resets, and a reset
    // needs `&mut self`, which ends every borrow of this slice.
    Some(unsafe { self.region.slice_mut(offset, size) })
  }

  /// Hands out memory suitable for `layout`.
  ///
  /// `free` is first padded up to `layout.align()` and the padding counts
  /// against the slab's capacity. On failure `free` is not moved.
  pub fn alloc_layout(
    &self,
    layout: Layout,
  ) -> Option<NonNull<u8>> {
    let base = self.region.base().as_ptr() as usize;
    let unaligned = base.checked_add(self.free.get())?;
    let aligned = align_to!(unaligned, layout.align())?;

    let offset = self.bump(aligned - base, layout.size())?;
    Some(self.address(offset))
  }

  /// Rewinds `free` to `start`, forgetting every allocation at once.
  ///
  /// Raw pointers obtained before the reset must not be used afterwards: the
  /// next allocation may return the same bytes.
  pub fn reset(&mut self) {
    trace!("reset slab at {:?}, {} bytes were in use", self.start(), self.used());
    self.free.set(0);
  }

  /// Unmaps the page. The slab is consumed, so it cannot be used again.
  ///
  /// Dropping a slab also unmaps it, but only logs a failure.
  pub fn destroy(self) -> Result<()> {
    self.region.release()
  }

  /// Address of the first byte of the page.
  pub fn start(&self) -> NonNull<u8> {
    self.region.base()
  }

  /// Address one past the last byte of the page.
  pub fn end(&self) -> NonNull<u8> {
    self.address(self.capacity())
  }

  /// Address the next allocation will start at.
  pub fn free(&self) -> NonNull<u8> {
    self.address(self.free.get())
  }

  pub fn capacity(&self) -> usize {
    self.region.len()
  }

  pub fn used(&self) -> usize {
    self.free.get()
  }

  pub fn remaining(&self) -> usize {
    self.capacity() - self.used()
  }

  /// Reserves `size` bytes at `offset` (which may lie past `free` because of
  /// padding) and moves `free` behind them. Returns `offset` on success.
  fn bump(
    &self,
    offset: usize,
    size: usize,
  ) -> Option<usize> {
    let next = match offset.checked_add(size) {
      Some(next) if next <= self.capacity() => next,
      _ => {
        trace!(
          "slab at {:?} exhausted: requested {} bytes, {} remaining",
          self.start(),
          size,
          self.remaining()
        );
        return None;
      }
    };

    self.free.set(next);

    trace!("allocated {} bytes at offset {}", size, offset);

    Some(offset)
  }

  fn address(
    &self,
    offset: usize,
  ) -> NonNull<u8> {
    debug_assert!(offset <= self.capacity());
    unsafe { self.region.base().add(offset) }
  }
}

impl std::fmt::Debug for Slab {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    f.debug_struct("Slab")
      .field("start", &self.start())
      .field("capacity", &self.capacity())
      .field("used", &self.used())
      .finish()
  }
}
