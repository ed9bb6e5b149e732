use libc::{_SC_PAGESIZE, sysconf};
use log::debug;

use crate::error::{Result, SlabError};

/// Size in bytes of one virtual-memory page, and therefore of one slab.
///
/// Discover it once with [`PageSize::query`] and pass the value to every
/// [`Slab::create`](crate::Slab::create) call. It is `Copy`, so there is no
/// need to keep it in a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(usize);

impl PageSize {
  /// Asks the OS for its page size via `sysconf(_SC_PAGESIZE)`.
  pub fn query() -> Result<Self> {
    let size = unsafe { sysconf(_SC_PAGESIZE) };

    if size <= 0 {
      return Err(SlabError::Config);
    }

    let page = usize::try_from(size)
      .ok()
      .filter(|bytes| bytes.is_power_of_two())
      .map(Self)
      .ok_or(SlabError::Config)?;

    debug!("system page size is {} bytes", page.get());

    Ok(page)
  }

  /// Builds a page size smaller than or equal to the OS page, e.g. to pin a
  /// 4096-byte slab on a system with 16 KiB pages.
  ///
  /// Returns `None` unless `bytes` is a non-zero power of two that fits in
  /// one OS page, so a slab never spans more than one page.
  pub fn new(bytes: usize) -> Option<Self> {
    let system = Self::query().ok()?;

    if bytes.is_power_of_two() && bytes <= system.get() {
      Some(Self(bytes))
    } else {
      None
    }
  }

  pub const fn get(self) -> usize {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_query() {
    let page = PageSize::query().unwrap();

    assert!(page.get() > 0);
    assert!(page.get().is_power_of_two());
  }

  #[test]
  fn test_query_is_stable() {
    assert_eq!(PageSize::query().unwrap(), PageSize::query().unwrap());
  }

  #[test]
  fn test_new() {
    assert_eq!(PageSize::new(4096).map(PageSize::get), Some(4096));
    assert_eq!(PageSize::new(1).map(PageSize::get), Some(1));

    assert_eq!(PageSize::new(0), None);
    assert_eq!(PageSize::new(4095), None);
    assert_eq!(PageSize::new(3 * 4096), None);
  }

  #[test]
  fn test_new_stays_within_one_page() {
    let system = PageSize::query().unwrap();

    assert_eq!(PageSize::new(system.get()), Some(system));
    assert_eq!(PageSize::new(system.get() * 2), None);
  }
}
