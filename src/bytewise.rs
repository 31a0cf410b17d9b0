//! Elementwise byte arithmetic over pre-aligned sequences.
//!
//! These are the PNG predictor formulas with the "left" shift already applied
//! by the caller: `a` is the left neighbor sequence, `b` the row above, `c` the
//! upper-left. Given equivalently shifted inputs they agree bit-for-bit with the
//! rolling unfilters in [`crate::unfilter`].

use crate::error::{Error, Result};

/// Paeth predictor.
///
/// Selects whichever of `a` (left), `b` (up), `c` (upper-left) is closest to
/// `p = a + b - c`, breaking ties in the order a, b, c.
#[inline]
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let a_i = a as i16;
    let b_i = b as i16;
    let c_i = c as i16;

    let p = a_i + b_i - c_i;
    let pa = (p - a_i).abs();
    let pb = (p - b_i).abs();
    let pc = (p - c_i).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Floor of the mean of two bytes, without overflow.
#[inline]
pub(crate) fn floor_avg(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

fn check_len(expected: &[u8], actual: &[u8]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(Error::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }
    Ok(())
}

/// `a[i] + b[i]` modulo 256.
pub fn add_bytewise(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    check_len(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x.wrapping_add(y)).collect())
}

/// `a[i] - b[i]` modulo 256.
pub fn sub_bytewise(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    check_len(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x.wrapping_sub(y)).collect())
}

/// `floor((a[i] + b[i]) / 2)`.
pub fn avg_bytewise(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    check_len(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| floor_avg(x, y)).collect())
}

/// Paeth predictor selected independently at every position.
pub fn paeth_bytewise(a: &[u8], b: &[u8], c: &[u8]) -> Result<Vec<u8>> {
    check_len(a, b)?;
    check_len(a, c)?;
    Ok(a.iter()
        .zip(b)
        .zip(c)
        .map(|((&x, &y), &z)| paeth_predictor(x, y, z))
        .collect())
}
