//! Bounds-checked views into a shared backing buffer.
//!
//! A [`Window`] is an `(offset, len)` pair over a reference-counted byte
//! buffer. Cloning a window, slicing it or asking for the region that follows
//! it never copies bytes: every derived window aliases the same backing
//! buffer, and a write through any of them is visible through all others.
//! The buffer is released when the last window over it is dropped.
//!
//! ```text
//! backing: [..........|<- header ->|<---- next(len) ---->|.....]
//!                     ^offset      ^offset + len
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bytes::Bytes;

use crate::field::FieldCodec;
use crate::WireError;

type Backing = Rc<RefCell<Vec<u8>>>;

/// A view `(offset, len)` into a shared mutable byte buffer.
///
/// Invariant: `offset + len <= backing.len()`. The backing buffer never
/// changes size once created, so the invariant holds for the window's life.
#[derive(Clone)]
pub struct Window {
    backing: Backing,
    offset: usize,
    len: usize,
}

impl Window {
    /// Adopt `bytes` as a new backing buffer and view all of it
    pub fn new(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self {
            backing: Rc::new(RefCell::new(bytes)),
            offset: 0,
            len,
        }
    }

    /// Copy `bytes` into a new backing buffer
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Allocate a zero-filled backing buffer of `len` bytes
    pub fn zeroed(len: usize) -> Self {
        Self::new(vec![0u8; len])
    }

    /// Start of this window within the backing buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Declared length of this window
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window declares zero bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size of the backing buffer
    pub fn backing_len(&self) -> usize {
        self.backing.borrow().len()
    }

    /// Bytes from this window's offset to the end of the backing buffer
    pub fn capacity(&self) -> usize {
        self.backing_len() - self.offset
    }

    /// Bytes in the backing buffer beyond this window's declared end
    pub fn available_length(&self) -> usize {
        self.backing_len() - (self.offset + self.len)
    }

    /// Sub-window at `relative_offset` of `len` bytes.
    ///
    /// Fails with [`WireError::OutOfRange`] instead of clamping when the
    /// requested range leaves this window.
    pub fn slice(&self, relative_offset: usize, len: usize) -> Result<Window, WireError> {
        self.check(relative_offset, len)?;
        Ok(Window {
            backing: Rc::clone(&self.backing),
            offset: self.offset + relative_offset,
            len,
        })
    }

    /// Window of `len` bytes starting right where this one ends
    pub fn next(&self, len: usize) -> Result<Window, WireError> {
        let available = self.available_length();
        if len > available {
            return Err(WireError::out_of_range(self.len, len, available));
        }
        Ok(Window {
            backing: Rc::clone(&self.backing),
            offset: self.offset + self.len,
            len,
        })
    }

    /// Redeclare the window length, keeping its offset
    pub fn set_len(&mut self, len: usize) -> Result<(), WireError> {
        let capacity = self.capacity();
        if len > capacity {
            return Err(WireError::out_of_range(0, len, capacity));
        }
        self.len = len;
        Ok(())
    }

    /// Whether both windows view the same backing buffer
    pub fn same_buffer(&self, other: &Window) -> bool {
        Rc::ptr_eq(&self.backing, &other.backing)
    }

    /// Whether this window starts exactly where `other` ends, in the same buffer
    pub fn follows(&self, other: &Window) -> bool {
        self.same_buffer(other) && self.offset == other.offset + other.len
    }

    /// Decode field `C` at `offset` within this window
    pub fn decode<C: FieldCodec>(&self, offset: usize) -> Result<C, WireError> {
        self.check(offset, C::WIDTH)?;
        let start = self.offset + offset;
        let backing = self.backing.borrow();
        Ok(C::read(&backing[start..start + C::WIDTH]))
    }

    /// Encode `value` at `offset` within this window, in place
    pub fn encode<C: FieldCodec>(&self, offset: usize, value: &C) -> Result<(), WireError> {
        self.check(offset, C::WIDTH)?;
        let start = self.offset + offset;
        let mut backing = self.backing.borrow_mut();
        value.write(&mut backing[start..start + C::WIDTH]);
        Ok(())
    }

    /// Copy `len` bytes at `offset` out of the window
    pub fn read(&self, offset: usize, len: usize) -> Result<Vec<u8>, WireError> {
        self.check(offset, len)?;
        let start = self.offset + offset;
        Ok(self.backing.borrow()[start..start + len].to_vec())
    }

    /// Overwrite bytes at `offset`; visible through every aliasing window
    pub fn write(&self, offset: usize, src: &[u8]) -> Result<(), WireError> {
        self.check(offset, src.len())?;
        let start = self.offset + offset;
        self.backing.borrow_mut()[start..start + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Copy the contents of `src` to the start of this window.
    ///
    /// `src` may alias this window, overlapping or not.
    pub fn copy_from(&self, src: &Window) -> Result<(), WireError> {
        self.check(0, src.len)?;
        let bytes = src.to_vec();
        self.write(0, &bytes)
    }

    /// Run `f` over the bytes of this window.
    ///
    /// The backing buffer stays borrowed while `f` runs, so `f` must not
    /// touch another window over the same buffer.
    pub(crate) fn with_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        let backing = self.backing.borrow();
        f(&backing[self.offset..self.offset + self.len])
    }

    /// Run `f` over the bytes of this window, mutably; same rule as
    /// [`Window::with_bytes`]
    pub(crate) fn with_bytes_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut backing = self.backing.borrow_mut();
        f(&mut backing[self.offset..self.offset + self.len])
    }

    /// Copy the window contents into a vector
    pub fn to_vec(&self) -> Vec<u8> {
        self.with_bytes(|bytes| bytes.to_vec())
    }

    /// Snapshot the window contents
    pub fn to_bytes(&self) -> Bytes {
        self.with_bytes(Bytes::copy_from_slice)
    }

    fn check(&self, offset: usize, len: usize) -> Result<(), WireError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(WireError::out_of_range(offset, len, self.len)),
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("backing_len", &self.backing_len())
            .finish()
    }
}

/// Windows compare by the bytes they show, not by where those bytes live.
impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.to_vec() == other.to_vec()
    }
}

impl Eq for Window {}
