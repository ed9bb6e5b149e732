//! The only place that talks to the OS virtual-memory subsystem.
//!
//! Everything above this module works with a [`Region`]: a base pointer and a
//! length that are known to describe a live, exclusively owned mapping.

use std::{io, mem::ManuallyDrop, ptr::NonNull, slice};

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, c_void, mmap, munmap};
use log::{debug, error};

use crate::error::{Result, SlabError};

/// A private, anonymous, read/write mapping.
///
/// Dropping a region unmaps it. Use [`Region::release`] to observe an unmap
/// failure instead of having it logged.
pub(crate) struct Region {
  base: NonNull<u8>,
  len: usize,
}

// The mapping is owned by exactly one `Region`, nothing else aliases it.
unsafe impl Send for Region {}

fn errno() -> i32 {
  io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

impl Region {
  pub(crate) fn map(len: usize) -> Result<Self> {
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
      let code = errno();
      debug!("mmap of {} bytes failed, errno = {}", len, code);
      return Err(SlabError::Map { code });
    }

    // With a NULL hint the kernel never places a mapping at address zero.
    debug_assert!(!address.is_null());
    let base = unsafe { NonNull::new_unchecked(address as *mut u8) };

    debug!("mapped {} bytes at {:?}", len, base);

    Ok(Self { base, len })
  }

  pub(crate) fn base(&self) -> NonNull<u8> {
    self.base
  }

  pub(crate) fn len(&self) -> usize {
    self.len
  }

  /// Views the whole mapping as bytes.
  #[cfg(test)]
  pub(crate) fn as_slice(&self) -> &[u8] {
    unsafe { slice::from_raw_parts(self.base.as_ptr(), self.len) }
  }

  /// Writable view of `len` bytes starting `offset` bytes into the mapping.
  ///
  /// # Safety
  ///
  /// `offset + len` must not exceed the mapping, and no other live reference
  /// may cover the same bytes.
  #[allow(clippy::mut_from_ref)]
  pub(crate) unsafe fn slice_mut(
    &self,
    offset: usize,
    len: usize,
  ) -> &mut [u8] {
    unsafe { slice::from_raw_parts_mut(self.base.as_ptr().add(offset), len) }
  }

  /// Unmaps the region, reporting the OS error if there is one.
  pub(crate) fn release(self) -> Result<()> {
    let region = ManuallyDrop::new(self);
    unsafe { region.unmap() }
  }

  /// # Safety
  ///
  /// Must be called at most once per mapping.
  unsafe fn unmap(&self) -> Result<()> {
    let status = unsafe { munmap(self.base.as_ptr() as *mut c_void, self.len) };

    if status != 0 {
      return Err(SlabError::Unmap { code: errno() });
    }

    debug!("unmapped {} bytes at {:?}", self.len, self.base);

    Ok(())
  }
}

impl Drop for Region {
  fn drop(&mut self) {
    if let Err(err) = unsafe { self.unmap() } {
      error!("leaking {} bytes at {:?}: {}", self.len, self.base, err);
    }
  }
}
