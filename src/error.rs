use thiserror::Error;

/// Failures reported by the OS while configuring, mapping or unmapping a slab.
///
/// Running out of room inside a slab is not one of these: [`Slab::alloc`]
/// returns `None` for that.
///
/// [`Slab::alloc`]: crate::Slab::alloc
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SlabError {
  /// The OS could not report its virtual-memory page size.
  #[error("could not determine the system page size")]
  Config,

  /// `mmap(2)` refused to hand out the page.
  #[error("failed to map slab page (os error {code})")]
  Map { code: i32 },

  /// `munmap(2)` refused to release the page.
  #[error("failed to unmap slab page (os error {code})")]
  Unmap { code: i32 },
}

impl SlabError {
  /// The OS error code, when there is one.
  pub fn code(&self) -> Option<i32> {
    match self {
      SlabError::Config => None,
      SlabError::Map { code } | SlabError::Unmap { code } => Some(*code),
    }
  }
}

pub type Result<T> = std::result::Result<T, SlabError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_code() {
    assert_eq!(SlabError::Config.code(), None);
    assert_eq!(SlabError::Map { code: libc::ENOMEM }.code(), Some(libc::ENOMEM));
    assert_eq!(SlabError::Unmap { code: libc::EINVAL }.code(), Some(libc::EINVAL));
  }

  #[test]
  fn test_display_keeps_code() {
    let message = SlabError::Map { code: 12 }.to_string();
    assert!(message.contains("os error 12"), "{message}");
  }
}
