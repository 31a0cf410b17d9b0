//! Whole-image scanline reconstruction.
//!
//! Consumes a decompressed stream of `[filter tag, row bytes...]` records and
//! threads each reconstructed row through as the "above" row of the next.
//! Rows of one image are strictly serial; only independent images can be
//! reconstructed in parallel (`reconstruct_batch`, behind the `parallel`
//! feature).

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::filter::FilterType;
use crate::layout::RowLayout;
use crate::unfilter::unfilter_row_into;

/// Row-at-a-time reconstruction state for one image or interlace pass.
#[derive(Debug, Clone)]
pub struct Reconstructor {
    layout: RowLayout,
    prev_row: Vec<u8>,
    current_row: Vec<u8>,
    rows: usize,
}

impl Reconstructor {
    /// Start a pass; the first row is reconstructed against zeros.
    pub fn new(layout: RowLayout) -> Self {
        Self {
            layout,
            prev_row: vec![0u8; layout.row_bytes()],
            current_row: Vec::with_capacity(layout.row_bytes()),
            rows: 0,
        }
    }

    /// Geometry this reconstructor was created with.
    pub fn layout(&self) -> RowLayout {
        self.layout
    }

    /// Rows reconstructed since creation or the last [`reset`](Self::reset).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Forget the previous row, e.g. at the start of the next interlace pass.
    pub fn reset(&mut self) {
        self.prev_row.fill(0);
        self.rows = 0;
    }

    /// Reconstruct one tagged scanline and return the raw row.
    ///
    /// On error the previous row is kept, so the state still reflects the
    /// last good scanline.
    pub fn push_scanline(&mut self, tagged: &[u8]) -> Result<&[u8]> {
        if tagged.len() != self.layout.stride() {
            return Err(Error::LengthMismatch {
                expected: self.layout.stride(),
                actual: tagged.len(),
            });
        }
        let filter = FilterType::try_from(tagged[0])?;
        let row = &tagged[1..];
        trace!(row = self.rows, ?filter, "unfiltering scanline");

        self.current_row.clear();
        unfilter_row_into(
            filter,
            row,
            &self.prev_row,
            self.layout.bpp(),
            &mut self.current_row,
        )?;

        std::mem::swap(&mut self.current_row, &mut self.prev_row);
        self.rows += 1;
        Ok(&self.prev_row)
    }
}

/// Reconstruct a complete tagged scanline stream into raw rows.
///
/// Fails on the first malformed scanline without returning partial output.
pub fn reconstruct(data: &[u8], layout: RowLayout) -> Result<Vec<u8>> {
    let height = layout.rows_in(data.len())?;
    debug!(
        height,
        row_bytes = layout.row_bytes(),
        bpp = layout.bpp(),
        "reconstructing scanlines"
    );

    let mut reconstructor = Reconstructor::new(layout);
    let mut raw_rows = Vec::with_capacity(height * layout.row_bytes());

    for (y, tagged) in data.chunks_exact(layout.stride()).enumerate() {
        match reconstructor.push_scanline(tagged) {
            Ok(row) => raw_rows.extend_from_slice(row),
            Err(err) => {
                warn!(row = y, %err, "rejecting scanline");
                return Err(err);
            }
        }
    }

    Ok(raw_rows)
}

/// Reconstruct several independent images across the rayon pool.
///
/// Results come back in input order, one per image.
#[cfg(feature = "parallel")]
pub fn reconstruct_batch(images: &[(&[u8], RowLayout)]) -> Vec<Result<Vec<u8>>> {
    use rayon::prelude::*;

    images
        .par_iter()
        .map(|&(data, layout)| reconstruct(data, layout))
        .collect()
}
