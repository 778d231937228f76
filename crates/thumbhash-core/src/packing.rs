//! Byte layout of a ThumbHash.
//!
//! ```text
//! bytes 0-2  header A: L-dc(6) P-dc(6) Q-dc(6) L-scale(5) has_alpha(1)
//! bytes 3-4  header B: bound(3) P-scale(6) Q-scale(6) is_landscape(1)
//! byte  5    alpha:    A-dc(4) A-scale(4)        (only when has_alpha)
//! rest       AC nibbles, two per byte, low nibble first
//! ```
//!
//! Fields are packed least-significant bit first. All quantizers round half
//! away from zero ([`f64::round`]) and clamp to the field width.

use crate::channel::ac_count;
use crate::error::ThumbhashError;

/// Length of headers A and B.
pub const HEADER_LEN: usize = 5;

/// Luminance frequency bound on the long axis for opaque images.
pub const OPAQUE_LUMA_LIMIT: usize = 7;

/// Luminance frequency bound on the long axis when an alpha channel is present.
pub const ALPHA_LUMA_LIMIT: usize = 5;

/// Frequency bounds of the P and Q channels.
pub const CHROMA_BOUND: usize = 3;

/// Frequency bounds of the A channel.
pub const ALPHA_BOUND: usize = 5;

/// Long-axis luminance bound for an image with or without alpha.
#[inline]
pub fn luma_limit(has_alpha: bool) -> usize {
    if has_alpha {
        ALPHA_LUMA_LIMIT
    } else {
        OPAQUE_LUMA_LIMIT
    }
}

/// Quantize `value * levels` to an integer in `0..=max`.
#[inline]
pub fn quantize(value: f64, levels: f64, max: u8) -> u8 {
    (value * levels).round().clamp(0.0, max as f64) as u8
}

/// Quantize a signed value in `-1.0..=1.0` to six bits.
#[inline]
pub fn quantize_signed(value: f64) -> u8 {
    (31.5 + 31.5 * value).round().clamp(0.0, 63.0) as u8
}

/// Total hash length for luminance bounds `(lx, ly)` as stored by the
/// encoder (before the decoder's minimum of 3 is applied).
///
/// # Examples
///
/// ```
/// use thumbhash_core::packing::hash_len;
/// // A 1x1 opaque pixel: 27 + 5 + 5 AC nibbles after a 5-byte header.
/// assert_eq!(hash_len(7, 7, false), 24);
/// assert_eq!(hash_len(5, 5, true), 25);
/// ```
pub fn hash_len(lx: usize, ly: usize, has_alpha: bool) -> usize {
    let mut count = ac_count(lx.max(3), ly.max(3)) + 2 * ac_count(CHROMA_BOUND, CHROMA_BOUND);
    let mut start = HEADER_LEN;
    if has_alpha {
        count += ac_count(ALPHA_BOUND, ALPHA_BOUND);
        start += 1;
    }
    start + (count + 1) / 2
}

/// Headers A and B, holding quantized values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Luminance DC, 6 bits.
    pub l_dc: u8,
    /// Yellow-blue DC, 6 bits, offset by 31.5.
    pub p_dc: u8,
    /// Red-green DC, 6 bits, offset by 31.5.
    pub q_dc: u8,
    /// Luminance scale, 5 bits.
    pub l_scale: u8,
    /// Whether an alpha byte and alpha AC terms follow.
    pub has_alpha: bool,
    /// Luminance bound on the short axis, 3 bits.
    pub short_bound: u8,
    /// Yellow-blue scale, 6 bits.
    pub p_scale: u8,
    /// Red-green scale, 6 bits.
    pub q_scale: u8,
    /// Whether the image is wider than it is tall.
    pub is_landscape: bool,
}

impl Header {
    /// Pack into five bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let a = (self.l_dc as u32 & 63)
            | ((self.p_dc as u32 & 63) << 6)
            | ((self.q_dc as u32 & 63) << 12)
            | ((self.l_scale as u32 & 31) << 18)
            | ((self.has_alpha as u32) << 23);
        let b = (self.short_bound as u16 & 7)
            | ((self.p_scale as u16 & 63) << 3)
            | ((self.q_scale as u16 & 63) << 9)
            | ((self.is_landscape as u16) << 15);
        [
            (a & 255) as u8,
            ((a >> 8) & 255) as u8,
            (a >> 16) as u8,
            (b & 255) as u8,
            (b >> 8) as u8,
        ]
    }

    /// Parse from the first five bytes of a hash.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbhashError::MalformedHash`] if fewer than five bytes are
    /// given.
    pub fn from_bytes(hash: &[u8]) -> Result<Self, ThumbhashError> {
        if hash.len() < HEADER_LEN {
            return Err(ThumbhashError::MalformedHash(format!(
                "expected at least {HEADER_LEN} header bytes, got {}",
                hash.len()
            )));
        }
        let a = hash[0] as u32 | ((hash[1] as u32) << 8) | ((hash[2] as u32) << 16);
        let b = hash[3] as u16 | ((hash[4] as u16) << 8);
        Ok(Self {
            l_dc: (a & 63) as u8,
            p_dc: ((a >> 6) & 63) as u8,
            q_dc: ((a >> 12) & 63) as u8,
            l_scale: ((a >> 18) & 31) as u8,
            has_alpha: (a >> 23) != 0,
            short_bound: (b & 7) as u8,
            p_scale: ((b >> 3) & 63) as u8,
            q_scale: ((b >> 9) & 63) as u8,
            is_landscape: (b >> 15) != 0,
        })
    }

    /// Luminance bounds `(lx, ly)` as chosen by the encoder, without the
    /// decoder's minimum of 3.
    pub fn luminance_bounds(&self) -> (usize, usize) {
        let limit = luma_limit(self.has_alpha);
        let short = self.short_bound as usize;
        if self.is_landscape {
            (limit, short)
        } else {
            (short, limit)
        }
    }

    /// Luminance DC in `0.0..=1.0`.
    pub fn l_dc(&self) -> f64 {
        self.l_dc as f64 / 63.0
    }

    /// Yellow-blue DC in `-1.0..=1.0`.
    pub fn p_dc(&self) -> f64 {
        self.p_dc as f64 / 31.5 - 1.0
    }

    /// Red-green DC in `-1.0..=1.0`.
    pub fn q_dc(&self) -> f64 {
        self.q_dc as f64 / 31.5 - 1.0
    }

    /// Luminance AC scale in `0.0..=1.0`.
    pub fn l_scale(&self) -> f64 {
        self.l_scale as f64 / 31.0
    }

    /// Yellow-blue AC scale in `0.0..=1.0`, before the decoder's boost.
    pub fn p_scale(&self) -> f64 {
        self.p_scale as f64 / 63.0
    }

    /// Red-green AC scale in `0.0..=1.0`, before the decoder's boost.
    pub fn q_scale(&self) -> f64 {
        self.q_scale as f64 / 63.0
    }
}

/// The optional alpha byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaHeader {
    /// Alpha DC, 4 bits.
    pub dc: u8,
    /// Alpha scale, 4 bits.
    pub scale: u8,
}

impl AlphaHeader {
    /// Pack into one byte, DC in the low nibble.
    pub fn to_byte(self) -> u8 {
        (self.dc & 15) | ((self.scale & 15) << 4)
    }

    /// Parse the byte that follows the header.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            dc: byte & 15,
            scale: byte >> 4,
        }
    }

    /// Alpha DC in `0.0..=1.0`.
    pub fn dc(&self) -> f64 {
        self.dc as f64 / 15.0
    }

    /// Alpha AC scale in `0.0..=1.0`.
    pub fn scale(&self) -> f64 {
        self.scale as f64 / 15.0
    }
}

/// Appends 4-bit values to a hash, low nibble first.
#[derive(Debug)]
pub struct NibbleWriter<'a> {
    out: &'a mut Vec<u8>,
    odd: bool,
}

impl<'a> NibbleWriter<'a> {
    /// Start writing at the end of `out`.
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, odd: false }
    }

    /// Append one nibble. Only the low four bits of `bits` are kept.
    pub fn push(&mut self, bits: u8) {
        let bits = bits & 15;
        if self.odd {
            if let Some(last) = self.out.last_mut() {
                *last |= bits << 4;
            }
        } else {
            self.out.push(bits);
        }
        self.odd = !self.odd;
    }

    /// Quantize a normalized AC value in `0.0..=1.0` and append it.
    pub fn push_unit(&mut self, value: f64) {
        self.push(quantize(value, 15.0, 15));
    }
}

/// Iterate the nibbles of an AC payload, low nibble first.
///
/// # Examples
///
/// ```
/// use thumbhash_core::packing::nibbles;
/// let v: Vec<u8> = nibbles(&[0x21, 0x43]).collect();
/// assert_eq!(v, [1, 2, 3, 4]);
/// ```
pub fn nibbles(payload: &[u8]) -> impl Iterator<Item = u8> + '_ {
    payload.iter().flat_map(|&b| [b & 15, b >> 4])
}
