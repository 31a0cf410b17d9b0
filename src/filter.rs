//! PNG filter types and the forward filter transform.
//!
//! The forward transform is the exact inverse of [`crate::unfilter`]; it is
//! what an encoder writes and what the round-trip tests check against.

use crate::bytewise::{floor_avg, paeth_predictor};
use crate::error::{Error, Result};
use crate::layout::{check_stride, RowLayout};

/// Per-scanline filter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FilterType {
    /// Raw bytes.
    None = 0,
    /// Difference from the byte `bpp` to the left.
    Sub = 1,
    /// Difference from the byte above.
    Up = 2,
    /// Difference from the floored mean of left and above.
    Average = 3,
    /// Difference from the Paeth predictor.
    Paeth = 4,
}

impl FilterType {
    /// Every filter type, in tag order.
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];
}

impl TryFrom<u8> for FilterType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(FilterType::None),
            1 => Ok(FilterType::Sub),
            2 => Ok(FilterType::Up),
            3 => Ok(FilterType::Average),
            4 => Ok(FilterType::Paeth),
            _ => Err(Error::UnknownFilterType(value)),
        }
    }
}

impl From<FilterType> for u8 {
    fn from(filter: FilterType) -> u8 {
        filter as u8
    }
}

/// Filter raw rows into a tagged scanline stream, `filter` on every row.
///
/// `data` must hold a whole number of `layout.row_bytes()` rows. The first
/// row is filtered against a zero row.
pub fn apply_filters(data: &[u8], layout: RowLayout, filter: FilterType) -> Result<Vec<u8>> {
    let row_bytes = layout.row_bytes();
    if data.len() % row_bytes != 0 {
        return Err(Error::LengthMismatch {
            expected: data.len().next_multiple_of(row_bytes),
            actual: data.len(),
        });
    }
    let height = data.len() / row_bytes;
    let zero_row = vec![0u8; row_bytes];

    let mut output = Vec::with_capacity(layout.stride() * height);
    let mut prev_row: &[u8] = &zero_row;

    for row in data.chunks_exact(row_bytes) {
        output.push(filter.into());
        filter_row(filter, row, prev_row, layout.bpp(), &mut output)?;
        prev_row = row;
    }

    Ok(output)
}

/// Filter one raw row, appending the filtered bytes (without a tag) to `output`.
///
/// `prev_row` is the raw row above, or zeros for the first row.
pub fn filter_row(
    filter: FilterType,
    row: &[u8],
    prev_row: &[u8],
    bpp: usize,
    output: &mut Vec<u8>,
) -> Result<()> {
    check_stride(bpp, row.len())?;
    if prev_row.len() != row.len() {
        return Err(Error::LengthMismatch {
            expected: row.len(),
            actual: prev_row.len(),
        });
    }

    match filter {
        FilterType::None => output.extend_from_slice(row),
        FilterType::Sub => filter_sub(row, bpp, output),
        FilterType::Up => filter_up(row, prev_row, output),
        FilterType::Average => filter_average(row, prev_row, bpp, output),
        FilterType::Paeth => filter_paeth(row, prev_row, bpp, output),
    }
    Ok(())
}

/// Sub filter: difference from left pixel.
fn filter_sub(row: &[u8], bpp: usize, output: &mut Vec<u8>) {
    for (i, &byte) in row.iter().enumerate() {
        let left = if i >= bpp { row[i - bpp] } else { 0 };
        output.push(byte.wrapping_sub(left));
    }
}

/// Up filter: difference from above pixel.
fn filter_up(row: &[u8], prev_row: &[u8], output: &mut Vec<u8>) {
    for (i, &byte) in row.iter().enumerate() {
        output.push(byte.wrapping_sub(prev_row[i]));
    }
}

/// Average filter: difference from average of left and above.
fn filter_average(row: &[u8], prev_row: &[u8], bpp: usize, output: &mut Vec<u8>) {
    for (i, &byte) in row.iter().enumerate() {
        let left = if i >= bpp { row[i - bpp] } else { 0 };
        output.push(byte.wrapping_sub(floor_avg(left, prev_row[i])));
    }
}

/// Paeth filter: difference from Paeth predictor.
fn filter_paeth(row: &[u8], prev_row: &[u8], bpp: usize, output: &mut Vec<u8>) {
    for (i, &byte) in row.iter().enumerate() {
        let left = if i >= bpp { row[i - bpp] } else { 0 };
        let above = prev_row[i];
        let upper_left = if i >= bpp { prev_row[i - bpp] } else { 0 };
        output.push(byte.wrapping_sub(paeth_predictor(left, above, upper_left)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unfilter::unfilter_row;

    #[test]
    fn test_filter_type_try_from() {
        for (tag, filter) in FilterType::ALL.iter().enumerate() {
            assert_eq!(FilterType::try_from(tag as u8), Ok(*filter));
            assert_eq!(u8::from(*filter), tag as u8);
        }
        assert_eq!(FilterType::try_from(5), Err(Error::UnknownFilterType(5)));
        assert_eq!(
            FilterType::try_from(255),
            Err(Error::UnknownFilterType(255))
        );
    }

    #[test]
    fn test_filter_sub() {
        let row = vec![10, 20, 30, 40, 50, 60];
        let mut output = Vec::new();
        filter_sub(&row, 3, &mut output);

        // First 3 bytes: no left pixel, so unchanged
        assert_eq!(&output[..3], &[10, 20, 30]);
        // Next 3 bytes: difference from 3 bytes back
        assert_eq!(&output[3..], &[30, 30, 30]);
    }

    #[test]
    fn test_filter_up() {
        let row = vec![50, 60, 70];
        let prev = vec![10, 20, 30];
        let mut output = Vec::new();
        filter_up(&row, &prev, &mut output);
        assert_eq!(output, vec![40, 40, 40]);
    }

    #[test]
    fn test_filter_row_inverts_unfilter() {
        let row = vec![12, 200, 7, 99, 255, 0, 31, 64];
        let prev = vec![250, 3, 17, 128, 1, 77, 200, 5];
        for filter in FilterType::ALL {
            let mut filtered = Vec::new();
            filter_row(filter, &row, &prev, 2, &mut filtered).unwrap();
            let restored = unfilter_row(filter, &filtered, &prev, 2).unwrap();
            assert_eq!(restored, row, "{filter:?} did not round-trip");
        }
    }

    #[test]
    fn test_filter_row_rejects_bad_input() {
        let mut out = Vec::new();
        assert!(filter_row(FilterType::Sub, &[1, 2], &[0, 0], 0, &mut out).is_err());
        assert!(filter_row(FilterType::Up, &[1, 2], &[0], 1, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_apply_filters_none() {
        let data = vec![100, 150, 200, 50, 100, 150];
        let layout = RowLayout::new(6, 3).unwrap();
        let filtered = apply_filters(&data, layout, FilterType::None).unwrap();

        // Should be filter byte (0) + original data
        assert_eq!(filtered[0], 0);
        assert_eq!(&filtered[1..], &data[..]);
    }

    #[test]
    fn test_apply_filters_multiple_rows() {
        let data = vec![
            10, 20, 30, 40, 50, 60, // Row 1
            70, 80, 90, 100, 110, 120, // Row 2
        ];
        let layout = RowLayout::new(6, 3).unwrap();
        let filtered = apply_filters(&data, layout, FilterType::Up).unwrap();

        assert_eq!(filtered.len(), 2 * (1 + 6));
        assert_eq!(filtered[0], 2);
        assert_eq!(&filtered[1..7], &data[..6]);
        assert_eq!(filtered[7], 2);
        assert_eq!(&filtered[8..], &[60; 6]);
    }

    #[test]
    fn test_apply_filters_sub_per_row() {
        // Sub never looks at the row above
        let data = vec![5, 6, 7, 8, 5, 6, 7, 8];
        let layout = RowLayout::new(4, 2).unwrap();
        let filtered = apply_filters(&data, layout, FilterType::Sub).unwrap();
        assert_eq!(filtered, vec![1, 5, 6, 2, 2, 1, 5, 6, 2, 2]);
    }

    #[test]
    fn test_filter_row_stride_beyond_max_bpp() {
        let row = vec![1u8; 18];
        let prev = vec![0u8; 18];
        let mut filtered = Vec::new();
        filter_row(FilterType::Sub, &row, &prev, 9, &mut filtered).unwrap();
        let mut expected = vec![1u8; 9];
        expected.extend_from_slice(&[0; 9]);
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_apply_filters_partial_row() {
        let layout = RowLayout::new(4, 1).unwrap();
        let err = apply_filters(&[1, 2, 3, 4, 5], layout, FilterType::Paeth);
        assert_eq!(
            err,
            Err(Error::LengthMismatch {
                expected: 8,
                actual: 5
            })
        );
    }
}
