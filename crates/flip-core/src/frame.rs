//! Single-frame raster values.
//!
//! This module provides [`Frame`], the owned value type for one frame of a
//! multi-frame container, and [`Signature`], the content digest frames
//! compare by.
//!
//! # Memory Layout
//!
//! Frames store RGBA8 pixels interleaved in **row-major** order:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The buffer lives behind an [`Arc`], so cloning a frame shares the pixel
//! data and mutation is copy-on-write via [`Arc::make_mut`].
//!
//! # Equality
//!
//! Two frames are equal iff their dimensions and pixel bytes are equal;
//! display delay and provenance are ignored. See [`Frame::signature`].
//!
//! # Usage
//!
//! ```rust
//! use flip_core::Frame;
//!
//! let mut frame = Frame::filled(16, 16, [255, 0, 0, 255]);
//! frame.set_delay(10);
//! assert_eq!(frame.size(), (16, 16));
//! assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
//! ```

use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Number of bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned RGBA8 raster frame with display-delay metadata.
///
/// The pixel buffer is stored in an [`Arc<Vec<u8>>`], enabling:
/// - Zero-copy cloning (shares underlying data)
/// - Cheap snapshots held by frame proxies
/// - Copy-on-write mutation through [`pixels_mut`](Self::pixels_mut)
///
/// # Example
///
/// ```rust
/// use flip_core::Frame;
///
/// let mut frame = Frame::new(32, 32);
/// frame.set_pixel(3, 4, [10, 20, 30, 255]).unwrap();
/// assert_eq!(frame.pixel(3, 4), Some([10, 20, 30, 255]));
/// ```
#[derive(Clone)]
pub struct Frame {
    /// Pixel data buffer (Arc for cheap cloning).
    pixels: Arc<Vec<u8>>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Display delay in ticks (GIF-style centiseconds by convention).
    delay: u32,
}

impl Frame {
    /// Creates a new frame filled with transparent black.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flip_core::Frame;
    ///
    /// let frame = Frame::new(32, 16);
    /// assert_eq!(frame.width(), 32);
    /// assert_eq!(frame.height(), 16);
    /// assert_eq!(frame.delay(), 0);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            pixels: Arc::new(vec![0; len]),
            width,
            height,
            delay: 0,
        }
    }

    /// Creates a frame filled with a single RGBA value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flip_core::Frame;
    ///
    /// let white = Frame::filled(8, 8, [255, 255, 255, 255]);
    /// assert_eq!(white.pixel(7, 7), Some([255, 255, 255, 255]));
    /// ```
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            pixels: Arc::new(pixels),
            width,
            height,
            delay: 0,
        }
    }

    /// Creates a frame from existing RGBA8 pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if the buffer length does not equal
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(Error::invalid_frame(format!(
                "expected {} pixel bytes for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
            width,
            height,
            delay: 0,
        })
    }

    /// Returns the frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the frame dimensions as (width, height).
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the display delay in ticks.
    #[inline]
    pub fn delay(&self) -> u32 {
        self.delay
    }

    /// Sets the display delay in ticks.
    #[inline]
    pub fn set_delay(&mut self, delay: u32) {
        self.delay = delay;
    }

    /// Returns `true` if the frame has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw RGBA8 pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns a mutable reference to the pixel data.
    ///
    /// If the buffer is shared (Arc refcount > 1), this clones the data to
    /// ensure exclusive access (copy-on-write).
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.pixels).as_mut_slice()
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[off..off + BYTES_PER_PIXEL]);
        Some(px)
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if (x, y) is outside the frame.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_range(
                x as isize,
                self.width as usize * self.height as usize,
            ));
        }
        let off = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.pixels_mut()[off..off + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        Ok(())
    }

    /// Checks that this frame can be stored in a container.
    ///
    /// Rejects zero-area frames; this is the validation a container runs
    /// before any mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] for zero-area frames.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::invalid_frame(format!(
                "zero-area frame ({}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Computes the content signature of this frame.
    ///
    /// The digest covers dimensions and pixel bytes; the display delay is
    /// deliberately excluded, so frames that differ only in timing compare
    /// equal.
    pub fn signature(&self) -> Signature {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.pixels.as_slice());
        Signature(hasher.finalize().into())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("delay", &self.delay)
            .finish()
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.pixels == other.pixels
    }
}

impl Eq for Frame {}

/// SHA-256 content signature of a frame.
///
/// Frames (and frame proxies) compare by signature, never by identity or
/// position: independently cloned copies of the same content are equal.
///
/// # Example
///
/// ```rust
/// use flip_core::Frame;
///
/// let a = Frame::filled(8, 8, [1, 2, 3, 255]);
/// let b = a.clone();
/// assert_eq!(a.signature(), b.signature());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 32]);

impl Signature {
    /// Returns the raw digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}
