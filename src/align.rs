/// Rounds `value` up to the next multiple of `align`, which must be a power
/// of two. Evaluates to `None` if the result does not fit in a `usize`.
///
/// # Examples
///
/// ```rust
/// use rslab::align_to;
///
/// assert_eq!(align_to!(13usize, 8usize), Some(16));
/// assert_eq!(align_to!(16usize, 8usize), Some(16));
/// assert_eq!(align_to!(0usize, 4096usize), Some(0));
/// assert_eq!(align_to!(usize::MAX, 2usize), None);
/// ```
#[macro_export]
macro_rules! align_to {
  ($value:expr, $align:expr) => {{
    let align: usize = $align;
    debug_assert!(align.is_power_of_two(), "alignment must be a power of two");
    ($value as usize)
      .checked_add(align - 1)
      .map(|value| value & !(align - 1))
  }};
}

#[cfg(test)]
mod tests {
  #[test]
  fn test_align_to() {
    let cases: [(usize, usize, usize); 9] = [
      (0, 1, 0),
      (7, 1, 7),
      (1, 2, 2),
      (3, 4, 4),
      (9, 8, 16),
      (17, 16, 32),
      (32, 16, 32),
      (33, 64, 64),
      (129, 128, 256),
    ];

    for (value, align, expected) in cases {
      assert_eq!(align_to!(value, align), Some(expected), "align_to!({value}, {align})");
    }
  }

  #[test]
  fn test_align_to_page() {
    assert_eq!(align_to!(1usize, 4096usize), Some(4096));
    assert_eq!(align_to!(4096usize, 4096usize), Some(4096));
    assert_eq!(align_to!(4097usize, 4096usize), Some(8192));
  }

  #[test]
  fn test_align_to_overflow() {
    assert_eq!(align_to!(usize::MAX - 2, 4usize), None);
    assert_eq!(align_to!(usize::MAX, 1usize), Some(usize::MAX));
  }
}
