//! Scanline geometry shared by the filter and reconstruction drivers.

use crate::error::{Error, Result};

/// Widest pixel PNG can describe: RGBA at 16 bits per channel.
pub const MAX_BPP: usize = 8;

/// Validate a pixel stride for a row of `row_len` bytes.
///
/// Any positive stride is usable by the row filters; only [`RowLayout`]
/// holds PNG's `MAX_BPP` cap.
#[inline]
pub(crate) fn check_stride(bpp: usize, row_len: usize) -> Result<()> {
    if bpp == 0 {
        return Err(Error::InvalidStride { bpp, row_len });
    }
    Ok(())
}

/// Geometry of one de-interlaced pass: bytes per row and pixel stride.
///
/// Both values come from the caller's header parsing; this type only checks
/// they are usable, it never derives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    row_bytes: usize,
    bpp: usize,
}

impl RowLayout {
    /// Create a layout, rejecting empty rows and out-of-range strides.
    pub fn new(row_bytes: usize, bpp: usize) -> Result<Self> {
        if bpp > MAX_BPP {
            return Err(Error::InvalidStride {
                bpp,
                row_len: row_bytes,
            });
        }
        check_stride(bpp, row_bytes)?;
        if row_bytes == 0 {
            return Err(Error::InvalidStride { bpp, row_len: 0 });
        }
        Ok(Self { row_bytes, bpp })
    }

    /// Bytes in one reconstructed row.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Bytes per pixel.
    pub fn bpp(&self) -> usize {
        self.bpp
    }

    /// Size of one tagged record: filter byte plus row.
    pub fn stride(&self) -> usize {
        self.row_bytes + 1
    }

    /// Number of tagged records in a stream of `len` bytes.
    pub fn rows_in(&self, len: usize) -> Result<usize> {
        let stride = self.stride();
        if len % stride != 0 {
            return Err(Error::TruncatedScanlines { stride, len });
        }
        Ok(len / stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout_new() {
        let layout = RowLayout::new(12, 3).unwrap();
        assert_eq!(layout.row_bytes(), 12);
        assert_eq!(layout.bpp(), 3);
        assert_eq!(layout.stride(), 13);
    }

    #[test]
    fn test_row_layout_rejects_bad_stride() {
        assert_eq!(
            RowLayout::new(4, 0),
            Err(Error::InvalidStride { bpp: 0, row_len: 4 })
        );
        assert_eq!(
            RowLayout::new(64, MAX_BPP + 1),
            Err(Error::InvalidStride {
                bpp: MAX_BPP + 1,
                row_len: 64
            })
        );
        assert!(RowLayout::new(0, 1).is_err());
    }

    #[test]
    fn test_check_stride_accepts_any_positive() {
        assert!(check_stride(MAX_BPP + 1, 4).is_ok());
        assert!(check_stride(4096, 2).is_ok());
        assert!(check_stride(0, 2).is_err());
    }

    #[test]
    fn test_row_layout_bpp_wider_than_row() {
        // Out-of-row neighbors read as zero, so this is still well defined.
        assert!(RowLayout::new(2, 8).is_ok());
    }

    #[test]
    fn test_rows_in() {
        let layout = RowLayout::new(4, 1).unwrap();
        assert_eq!(layout.rows_in(0), Ok(0));
        assert_eq!(layout.rows_in(15), Ok(3));
        assert_eq!(
            layout.rows_in(14),
            Err(Error::TruncatedScanlines { stride: 5, len: 14 })
        );
    }
}
