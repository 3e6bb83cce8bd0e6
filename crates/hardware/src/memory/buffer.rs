//! Zero-initialized memory buffer.
//!
//! The backing store must behave as if every byte of memory were zero until
//! written, yet most traces touch a tiny fraction of it. On Unix the buffer is
//! an anonymous private `mmap`, so the kernel hands out zero pages only when a
//! block is first written back. Elsewhere, and if `mmap` fails, it falls back
//! to a zeroed heap allocation.

use std::fmt;
use std::slice;

/// An owned, fixed-size, zero-initialized byte buffer.
pub struct ZeroedBuffer {
    ptr: *mut u8,
    size: usize,
    is_mmap: bool,
}

// SAFETY: the buffer exclusively owns its allocation; shared access only
// hands out `&[u8]` and mutation requires `&mut self`.
unsafe impl Send for ZeroedBuffer {}
// SAFETY: see above.
unsafe impl Sync for ZeroedBuffer {}

impl ZeroedBuffer {
    /// Allocates `size` zero bytes.
    pub fn new(size: usize) -> Self {
        #[cfg(unix)]
        if size > 0 {
            // SAFETY: anonymous private mapping with no address hint; the
            // result is checked against MAP_FAILED before use.
            let ptr = unsafe {
                libc::mmap(
                    std::ptr::null_mut(),
                    size,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                    -1,
                    0,
                )
            };
            if ptr != libc::MAP_FAILED {
                return Self {
                    ptr: ptr as *mut u8,
                    size,
                    is_mmap: true,
                };
            }
            tracing::warn!(size, "mmap failed, falling back to heap allocation");
        }

        let boxed = vec![0u8; size].into_boxed_slice();
        Self {
            ptr: Box::into_raw(boxed) as *mut u8,
            size,
            is_mmap: false,
        }
    }

    /// Size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the buffer holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the whole buffer as a slice.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `size` initialized bytes for the
        // lifetime of `self`.
        unsafe { slice::from_raw_parts(self.ptr, self.size) }
    }

    /// Returns the whole buffer as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.size) }
    }
}

impl Drop for ZeroedBuffer {
    fn drop(&mut self) {
        if self.is_mmap {
            #[cfg(unix)]
            // SAFETY: `ptr`/`size` are exactly what `mmap` returned.
            unsafe {
                let _ = libc::munmap(self.ptr as *mut libc::c_void, self.size);
            }
        } else {
            // SAFETY: `ptr` came from `Box::into_raw` of a `[u8]` of `size`
            // elements and has not been freed.
            unsafe {
                drop(Box::from_raw(slice::from_raw_parts_mut(self.ptr, self.size)));
            }
        }
    }
}

impl fmt::Debug for ZeroedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZeroedBuffer")
            .field("size", &self.size)
            .field("is_mmap", &self.is_mmap)
            .finish()
    }
}
