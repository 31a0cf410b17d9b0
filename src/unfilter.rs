//! PNG scanline reconstruction.
//!
//! Reverses the five PNG filter types. Sub, Average and Paeth carry a rolling
//! `bpp`-wide accumulator of already-reconstructed bytes, indexed by
//! `i % bpp`; it starts at zero, which is what PNG defines for neighbors left
//! of the row start. Strides up to `MAX_BPP` keep the accumulator on the
//! stack. Inputs are never modified.

use crate::bytewise::{floor_avg, paeth_predictor};
use crate::error::{Error, Result};
use crate::filter::FilterType;
use crate::layout::{check_stride, MAX_BPP};

/// None filter: the row is already raw.
pub fn none(row: &[u8]) -> Vec<u8> {
    row.to_vec()
}

/// Sub filter: add the reconstructed byte `bpp` positions to the left.
pub fn sub(row: &[u8], bpp: usize) -> Result<Vec<u8>> {
    check_stride(bpp, row.len())?;
    check_non_empty(row, bpp)?;
    let mut out = Vec::with_capacity(row.len());
    unfilter_sub(row, bpp, &mut out);
    Ok(out)
}

/// Up filter: add the byte directly above.
pub fn up(row: &[u8], above: &[u8]) -> Result<Vec<u8>> {
    check_above(row, above)?;
    let mut out = Vec::with_capacity(row.len());
    unfilter_up(row, above, &mut out);
    Ok(out)
}

/// Average filter: add `floor((left + above) / 2)`.
pub fn average(row: &[u8], above: &[u8], bpp: usize) -> Result<Vec<u8>> {
    check_stride(bpp, row.len())?;
    check_non_empty(row, bpp)?;
    check_above(row, above)?;
    let mut out = Vec::with_capacity(row.len());
    unfilter_average(row, above, bpp, &mut out);
    Ok(out)
}

/// Paeth filter: add the Paeth prediction from left, above and upper-left.
pub fn paeth(row: &[u8], above: &[u8], bpp: usize) -> Result<Vec<u8>> {
    check_stride(bpp, row.len())?;
    check_non_empty(row, bpp)?;
    check_above(row, above)?;
    let mut out = Vec::with_capacity(row.len());
    unfilter_paeth(row, above, bpp, &mut out);
    Ok(out)
}

/// Reconstruct a row by reversing `filter`.
///
/// `above` is the previous reconstructed row, or zeros for the first row of
/// an image or interlace pass.
pub fn unfilter_row(filter: FilterType, row: &[u8], above: &[u8], bpp: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(row.len());
    unfilter_row_into(filter, row, above, bpp, &mut out)?;
    Ok(out)
}

/// Reconstruct a row, appending it to `out`.
///
/// All validation happens before anything is written, so on error `out` is
/// left untouched.
pub fn unfilter_row_into(
    filter: FilterType,
    row: &[u8],
    above: &[u8],
    bpp: usize,
    out: &mut Vec<u8>,
) -> Result<()> {
    check_stride(bpp, row.len())?;
    check_above(row, above)?;
    out.reserve(row.len());

    match filter {
        FilterType::None => out.extend_from_slice(row),
        FilterType::Sub => {
            check_non_empty(row, bpp)?;
            unfilter_sub(row, bpp, out);
        }
        FilterType::Up => unfilter_up(row, above, out),
        FilterType::Average => {
            check_non_empty(row, bpp)?;
            unfilter_average(row, above, bpp, out);
        }
        FilterType::Paeth => {
            check_non_empty(row, bpp)?;
            unfilter_paeth(row, above, bpp, out);
        }
    }
    Ok(())
}

fn check_above(row: &[u8], above: &[u8]) -> Result<()> {
    if above.len() != row.len() {
        return Err(Error::LengthMismatch {
            expected: row.len(),
            actual: above.len(),
        });
    }
    Ok(())
}

/// The `left[0..bpp)` accumulator.
enum LeftState {
    Stack([u8; MAX_BPP]),
    Heap(Vec<u8>),
}

impl LeftState {
    fn new(bpp: usize) -> Self {
        if bpp <= MAX_BPP {
            LeftState::Stack([0u8; MAX_BPP])
        } else {
            LeftState::Heap(vec![0u8; bpp])
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            LeftState::Stack(buf) => buf,
            LeftState::Heap(buf) => buf,
        }
    }
}

fn check_non_empty(row: &[u8], bpp: usize) -> Result<()> {
    if row.is_empty() {
        return Err(Error::InvalidStride { bpp, row_len: 0 });
    }
    Ok(())
}

fn unfilter_sub(row: &[u8], bpp: usize, out: &mut Vec<u8>) {
    let mut state = LeftState::new(bpp);
    let left = state.as_mut_slice();
    for (i, &byte) in row.iter().enumerate() {
        let j = i % bpp;
        let value = byte.wrapping_add(left[j]);
        left[j] = value;
        out.push(value);
    }
}

fn unfilter_up(row: &[u8], above: &[u8], out: &mut Vec<u8>) {
    out.extend(row.iter().zip(above).map(|(&x, &b)| x.wrapping_add(b)));
}

fn unfilter_average(row: &[u8], above: &[u8], bpp: usize, out: &mut Vec<u8>) {
    let mut state = LeftState::new(bpp);
    let left = state.as_mut_slice();
    for (i, &byte) in row.iter().enumerate() {
        let j = i % bpp;
        let value = byte.wrapping_add(floor_avg(left[j], above[i]));
        left[j] = value;
        out.push(value);
    }
}

fn unfilter_paeth(row: &[u8], above: &[u8], bpp: usize, out: &mut Vec<u8>) {
    let mut state = LeftState::new(bpp);
    let left = state.as_mut_slice();
    for (i, &byte) in row.iter().enumerate() {
        let j = i % bpp;
        let upper_left = if i >= bpp { above[i - bpp] } else { 0 };
        let value = byte.wrapping_add(paeth_predictor(left[j], above[i], upper_left));
        left[j] = value;
        out.push(value);
    }
}
