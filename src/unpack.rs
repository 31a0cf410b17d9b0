//! Expanding raw scanline bytes into samples.
//!
//! Sub-byte depths are packed most-significant bits first, so the first
//! sample in a byte is its leftmost pixel. 16-bit samples are big-endian.

use crate::error::{Error, Result};

/// Bits per sample. PNG allows exactly these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BitDepth {
    /// 1 bit, eight samples per byte.
    One = 1,
    /// 2 bits, four samples per byte.
    Two = 2,
    /// 4 bits, two samples per byte.
    Four = 4,
    /// One sample per byte.
    Eight = 8,
    /// One sample per two bytes, big-endian.
    Sixteen = 16,
}

impl BitDepth {
    /// Number of bits in one sample.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Largest value a sample can hold.
    pub fn max_sample(self) -> u16 {
        match self {
            BitDepth::Sixteen => u16::MAX,
            _ => (1u16 << self.bits()) - 1,
        }
    }

    /// Number of samples held in `len` bytes.
    pub fn sample_count(self, len: usize) -> usize {
        len * 8 / self.bits() as usize
    }

    /// Bytes needed to hold `samples` samples, padding the last byte.
    pub fn byte_len(self, samples: usize) -> usize {
        (samples * self.bits() as usize).div_ceil(8)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(BitDepth::One),
            2 => Ok(BitDepth::Two),
            4 => Ok(BitDepth::Four),
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            _ => Err(Error::UnsupportedBitDepth(value)),
        }
    }
}

/// Unpack every sample in `bytes` at the given bit depth.
pub fn unpack(bytes: &[u8], bit_depth: u8) -> Result<Vec<u16>> {
    unpack_samples(bytes, BitDepth::try_from(bit_depth)?)
}

/// Unpack every sample in `bytes`.
///
/// 16-bit data must have even length; there are no partial results.
pub fn unpack_samples(bytes: &[u8], depth: BitDepth) -> Result<Vec<u16>> {
    if depth == BitDepth::Sixteen && bytes.len() % 2 != 0 {
        return Err(Error::MisalignedSamples {
            len: bytes.len(),
            bit_depth: depth.bits(),
        });
    }

    let mut out = Vec::with_capacity(depth.sample_count(bytes.len()));
    match depth {
        BitDepth::Sixteen => {
            out.extend(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]])),
            );
        }
        BitDepth::Eight => out.extend(bytes.iter().map(|&b| b as u16)),
        BitDepth::One | BitDepth::Two | BitDepth::Four => {
            let bits = depth.bits();
            let mask = depth.max_sample() as u8;
            let per_byte = 8 / bits;
            for &byte in bytes {
                for i in (0..per_byte).rev() {
                    out.push(((byte >> (i * bits)) & mask) as u16);
                }
            }
        }
    }
    Ok(out)
}

/// Unpack exactly `samples` values from one row, dropping trailing pad bits.
///
/// PNG pads each row to a byte boundary, so a row of 3 two-bit pixels is one
/// byte with two unused low bits. `bytes` must be exactly the padded row.
pub fn unpack_row(bytes: &[u8], depth: BitDepth, samples: usize) -> Result<Vec<u16>> {
    let expected = depth.byte_len(samples);
    if bytes.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let mut out = unpack_samples(bytes, depth)?;
    out.truncate(samples);
    Ok(out)
}

/// Pack samples into bytes, zero-padding the final byte.
///
/// Inverse of [`unpack_samples`]. Samples wider than `depth` are masked.
pub fn pack_samples(samples: &[u16], depth: BitDepth) -> Vec<u8> {
    let mut out = Vec::with_capacity(depth.byte_len(samples.len()));
    match depth {
        BitDepth::Sixteen => {
            for &s in samples {
                out.extend_from_slice(&s.to_be_bytes());
            }
        }
        BitDepth::Eight => out.extend(samples.iter().map(|&s| s as u8)),
        BitDepth::One | BitDepth::Two | BitDepth::Four => {
            let bits = depth.bits();
            let mask = depth.max_sample() as u8;
            let mut acc: u8 = 0;
            let mut acc_bits = 0;
            for &s in samples {
                acc = (acc << bits) | (s as u8 & mask);
                acc_bits += bits;
                if acc_bits == 8 {
                    out.push(acc);
                    acc = 0;
                    acc_bits = 0;
                }
            }
            if acc_bits > 0 {
                acc <<= 8 - acc_bits;
                out.push(acc);
            }
        }
    }
    out
}
