//! Checks with the kernel that a slab really gives its page back.

#![cfg(target_os = "linux")]

use std::{io, sync::Mutex};

use rslab::{PageSize, Slab};

// A freed page may be handed to the next mmap, so tests here take turns.
static SERIAL: Mutex<()> = Mutex::new(());

fn is_mapped(
  address: usize,
  len: usize,
) -> bool {
  let mut residency = vec![0u8; len.div_ceil(4096)];

  let status = unsafe { libc::mincore(address as *mut libc::c_void, len, residency.as_mut_ptr()) };

  if status == 0 {
    return true;
  }

  assert_eq!(io::Error::last_os_error().raw_os_error(), Some(libc::ENOMEM));
  false
}

#[test]
fn test_destroy_unmaps_page() {
  let _serial = SERIAL.lock().unwrap();

  let page_size = PageSize::query().unwrap();
  let slab = Slab::create(page_size).unwrap();

  let start = slab.start().as_ptr() as usize;

  assert!(is_mapped(start, page_size.get()));

  slab.destroy().unwrap();

  assert!(!is_mapped(start, page_size.get()));
}

#[test]
fn test_drop_unmaps_page() {
  let _serial = SERIAL.lock().unwrap();

  let page_size = PageSize::query().unwrap();
  let slab = Slab::create(page_size).unwrap();
  slab.alloc(page_size.get()).unwrap();

  let start = slab.start().as_ptr() as usize;

  assert!(is_mapped(start, page_size.get()));

  drop(slab);

  assert!(!is_mapped(start, page_size.get()));
}
