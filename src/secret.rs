//! Reading key lines out of secret-bearing buffers.
//!
//! The input buffer is always overwritten with [`FILLER`] before
//! [`read_key`] returns. Only the matched line is copied out, into a
//! [`Zeroizing`] buffer. This is best effort: copies made before the call,
//! or by the allocator, are out of reach.

use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::ptr;
use std::sync::atomic::{compiler_fence, Ordering};

use zeroize::Zeroizing;

use crate::crypto::is_valid_encoding;
use crate::error::{NkError, Result};

/// Byte written over scrubbed buffers.
pub const FILLER: u8 = b'x';

/// Overwrites every byte of `buf` with [`FILLER`].
pub fn wipe(buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        // SAFETY: `byte` is a valid, aligned, exclusive reference.
        unsafe { ptr::write_volatile(byte, FILLER) };
    }
    compiler_fence(Ordering::SeqCst);
}

/// Wipes the borrowed buffer when dropped.
struct ScrubGuard<'a>(&'a mut [u8]);

impl Deref for ScrubGuard<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &*self.0
    }
}

impl Drop for ScrubGuard<'_> {
    fn drop(&mut self) {
        wipe(&mut *self.0);
    }
}

/// Returns a copy of the first line of `contents` that is a valid encoded
/// key, then scrubs `contents` on every path.
///
/// Lines are split on `\n`; a trailing `\r` is ignored.
pub fn read_key(contents: &mut [u8]) -> Result<Zeroizing<Vec<u8>>> {
    let contents = ScrubGuard(contents);

    let key = contents
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .find(|line| is_valid_encoding(line))
        .map(|line| Zeroizing::new(line.to_vec()));
    key.ok_or(NkError::KeyNotFound)
}

/// Reads `path` and extracts its key line with [`read_key`].
pub fn read_key_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let mut contents = fs::read(path).map_err(|error| NkError::Read {
        path: path.to_path_buf(),
        error,
    })?;
    read_key(&mut contents)
}

/// [`read_key_file`], returning the key as text.
pub fn read_key_string(path: &Path) -> Result<Zeroizing<String>> {
    let mut key = read_key_file(path)?;
    // Valid encodings are plain ASCII.
    let text = String::from_utf8(std::mem::take(&mut *key)).map_err(|_| NkError::KeyNotFound)?;
    Ok(Zeroizing::new(text))
}
