//! ThumbHash decoding: convert hash bytes back into a placeholder image.
//!
//! Besides full decoding, this module offers two fast paths that only look at
//! the header: the average color and the approximate aspect ratio.

use tracing::debug;

use crate::channel::{sample_pair, synthesis_table, Channel};
use crate::color::{lpq_to_rgb, unit_to_byte, Rgba};
use crate::error::ThumbhashError;
use crate::packing::{
    hash_len, nibbles, AlphaHeader, Header, ALPHA_BOUND, CHROMA_BOUND, HEADER_LEN,
};

/// Length of the longer side of a decoded image.
pub const OUTPUT_SIZE: usize = 32;

/// Saturation boost applied to chroma AC terms on decode, compensating for
/// the contrast lost to 4-bit quantization.
const CHROMA_BOOST: f64 = 1.25;

/// A decoded placeholder image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Width in pixels (at most 32).
    pub width: u32,
    /// Height in pixels (at most 32).
    pub height: u32,
    /// RGBA bytes in row-major order, RGB not premultiplied.
    pub rgba: Vec<u8>,
}

/// Read the encoder's luminance bounds, rejecting a zero short-axis bound.
fn stored_bounds(header: &Header) -> Result<(usize, usize), ThumbhashError> {
    if header.short_bound == 0 {
        return Err(ThumbhashError::MalformedHash(
            "luminance frequency bound is zero".to_string(),
        ));
    }
    Ok(header.luminance_bounds())
}

/// Output dimensions for an aspect ratio: 32 on the longer side.
fn output_size(ratio: f64) -> (usize, usize) {
    let size = OUTPUT_SIZE as f64;
    if ratio > 1.0 {
        (OUTPUT_SIZE, (size / ratio).round() as usize)
    } else {
        ((size * ratio).round() as usize, OUTPUT_SIZE)
    }
}

/// Extract the luminance frequency bounds `(lx, ly)` a decoder uses for a
/// hash, after widening each to at least 3.
///
/// # Errors
///
/// Returns [`ThumbhashError::MalformedHash`] if the hash is shorter than the
/// header or stores a zero bound.
///
/// # Examples
///
/// ```
/// use thumbhash_core::{encode, luminance_bounds};
/// let hash = encode(1, 1, &[0, 0, 0, 255]).unwrap();
/// assert_eq!(luminance_bounds(&hash).unwrap(), (7, 7));
/// ```
pub fn luminance_bounds(hash: &[u8]) -> Result<(u32, u32), ThumbhashError> {
    let header = Header::from_bytes(hash)?;
    let (lx, ly) = stored_bounds(&header)?;
    Ok((lx.max(3) as u32, ly.max(3) as u32))
}

/// Extract the approximate aspect ratio (`width / height`) of the original
/// image.
///
/// Only the alpha flag, the short-axis bound and the landscape flag are read,
/// so the result is quantized to ratios of small integers.
///
/// # Errors
///
/// Returns [`ThumbhashError::MalformedHash`] if the hash is shorter than the
/// header or stores a zero bound.
///
/// # Examples
///
/// ```
/// use thumbhash_core::{approximate_aspect_ratio, encode};
/// let pixels = [128u8, 128, 128, 255].repeat(100 * 50);
/// let hash = encode(100, 50, &pixels).unwrap();
/// assert_eq!(approximate_aspect_ratio(&hash).unwrap(), 7.0 / 4.0);
/// ```
pub fn approximate_aspect_ratio(hash: &[u8]) -> Result<f64, ThumbhashError> {
    let header = Header::from_bytes(hash)?;
    let (lx, ly) = stored_bounds(&header)?;
    Ok(lx as f64 / ly as f64)
}

/// Extract the average color of the image from the hash header.
///
/// Returns channels in `0.0..=1.0`; RGB is not premultiplied. No AC data is
/// read.
///
/// # Errors
///
/// Returns [`ThumbhashError::MalformedHash`] if the header (or the alpha byte
/// it announces) is missing.
///
/// # Examples
///
/// ```
/// use thumbhash_core::{average_rgba, encode};
/// let hash = encode(2, 2, &[0u8, 0, 255, 255].repeat(4)).unwrap();
/// let avg = average_rgba(&hash).unwrap();
/// assert!(avg.b > 0.95 && avg.r < 0.05 && avg.g < 0.05);
/// assert_eq!(avg.a, 1.0);
/// ```
pub fn average_rgba(hash: &[u8]) -> Result<Rgba, ThumbhashError> {
    let header = Header::from_bytes(hash)?;
    let a = if header.has_alpha {
        let byte = hash.get(HEADER_LEN).copied().ok_or_else(|| {
            ThumbhashError::MalformedHash("alpha byte missing".to_string())
        })?;
        AlphaHeader::from_byte(byte).dc()
    } else {
        1.0
    };
    Ok(Rgba::from_lpqa(header.l_dc(), header.p_dc(), header.q_dc(), a))
}

/// Decode a ThumbHash into an RGBA placeholder image.
///
/// The longer side of the output is 32 pixels; the shorter side follows the
/// approximate aspect ratio.
///
/// # Errors
///
/// Returns [`ThumbhashError::MalformedHash`] if the hash is shorter than the
/// header, stores a zero bound, or its length differs from what the header
/// declares.
///
/// # Examples
///
/// ```
/// use thumbhash_core::{decode, encode};
/// let hash = encode(4, 4, &[200u8, 120, 40, 255].repeat(16)).unwrap();
/// let image = decode(&hash).unwrap();
/// assert_eq!((image.width, image.height), (32, 32));
/// assert_eq!(image.rgba.len(), 32 * 32 * 4);
/// ```
pub fn decode(hash: &[u8]) -> Result<Image, ThumbhashError> {
    let header = Header::from_bytes(hash)?;
    let (stored_lx, stored_ly) = stored_bounds(&header)?;
    let has_alpha = header.has_alpha;

    let expected_len = hash_len(stored_lx, stored_ly, has_alpha);
    if hash.len() != expected_len {
        return Err(ThumbhashError::MalformedHash(format!(
            "expected {expected_len} bytes for {stored_lx}x{stored_ly} luminance{}, got {}",
            if has_alpha { " with alpha" } else { "" },
            hash.len()
        )));
    }

    let lx = stored_lx.max(3);
    let ly = stored_ly.max(3);
    let (alpha, ac_start) = if has_alpha {
        (Some(AlphaHeader::from_byte(hash[HEADER_LEN])), HEADER_LEN + 1)
    } else {
        (None, HEADER_LEN)
    };

    let mut ac = nibbles(&hash[ac_start..]);
    let l_channel = Channel::decode(lx, ly, header.l_dc(), header.l_scale(), &mut ac)?;
    let p_channel = Channel::decode(
        CHROMA_BOUND,
        CHROMA_BOUND,
        header.p_dc(),
        header.p_scale() * CHROMA_BOOST,
        &mut ac,
    )?;
    let q_channel = Channel::decode(
        CHROMA_BOUND,
        CHROMA_BOUND,
        header.q_dc(),
        header.q_scale() * CHROMA_BOOST,
        &mut ac,
    )?;
    let a_channel = alpha
        .map(|alpha| {
            Channel::decode(ALPHA_BOUND, ALPHA_BOUND, alpha.dc(), alpha.scale(), &mut ac)
        })
        .transpose()?;

    let (w, h) = output_size(stored_lx as f64 / stored_ly as f64);
    let min_bound = if has_alpha { ALPHA_BOUND } else { CHROMA_BOUND };
    let cos_x = synthesis_table(w, lx.max(min_bound));
    let cos_y = synthesis_table(h, ly.max(min_bound));

    let render_row = |(y, row): (usize, &mut [u8])| {
        let fy = &cos_y[y];
        for (px, fx) in row.chunks_exact_mut(4).zip(&cos_x) {
            let l = l_channel.sample(fx, fy);
            let (p, q) = sample_pair(&p_channel, &q_channel, fx, fy);
            let a = a_channel.as_ref().map_or(1.0, |a| a.sample(fx, fy));
            let [r, g, b] = lpq_to_rgb(l, p, q);
            px[0] = unit_to_byte(r);
            px[1] = unit_to_byte(g);
            px[2] = unit_to_byte(b);
            px[3] = unit_to_byte(a);
        }
    };

    let mut rgba = vec![0u8; w * h * 4];

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        rgba.par_chunks_mut(w * 4).enumerate().for_each(render_row);
    }

    #[cfg(not(feature = "parallel"))]
    rgba.chunks_mut(w * 4).enumerate().for_each(render_row);

    debug!(lx, ly, has_alpha, width = w, height = h, "decoded thumbhash");
    Ok(Image {
        width: w as u32,
        height: h as u32,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_impl::encode;

    fn gradient(w: usize, h: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                pixels.push((64 + x * 128 / w) as u8);
                pixels.push((96 + y * 64 / h) as u8);
                pixels.push(110);
                pixels.push(255);
            }
        }
        pixels
    }

    #[test]
    fn test_output_size() {
        assert_eq!(output_size(1.0), (32, 32));
        assert_eq!(output_size(7.0 / 4.0), (32, 18));
        assert_eq!(output_size(4.0 / 7.0), (18, 32));
        assert_eq!(output_size(7.0), (32, 5));
        assert_eq!(output_size(1.0 / 7.0), (5, 32));
    }

    #[test]
    fn test_aspect_ratio_landscape_and_portrait() {
        let wide = encode(100, 50, &gradient(100, 50)).unwrap();
        let tall = encode(50, 100, &gradient(50, 100)).unwrap();
        assert_eq!(approximate_aspect_ratio(&wide).unwrap(), 7.0 / 4.0);
        assert_eq!(approximate_aspect_ratio(&tall).unwrap(), 4.0 / 7.0);
    }

    #[test]
    fn test_aspect_ratio_too_short() {
        assert!(matches!(
            approximate_aspect_ratio(&[0, 0, 0, 0]),
            Err(ThumbhashError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_zero_bound_rejected() {
        let hash = [0u8, 0, 0, 0, 0];
        assert!(approximate_aspect_ratio(&hash).is_err());
        assert!(luminance_bounds(&hash).is_err());
        assert!(decode(&hash).is_err());
    }

    #[test]
    fn test_luminance_bounds_widened() {
        let hash = encode(100, 10, &[1u8, 2, 3, 255].repeat(1000)).unwrap();
        assert_eq!(luminance_bounds(&hash).unwrap(), (7, 3));
    }

    #[test]
    fn test_average_rgba_missing_alpha_byte() {
        let hash = encode(1, 1, &[10, 20, 30, 128]).unwrap();
        assert!(average_rgba(&hash).is_ok());
        assert!(matches!(
            average_rgba(&hash[..HEADER_LEN]),
            Err(ThumbhashError::MalformedHash(_))
        ));
    }

    #[test]
    fn test_decode_dimensions() {
        let image = decode(&encode(100, 50, &gradient(100, 50)).unwrap()).unwrap();
        assert_eq!((image.width, image.height), (32, 18));
        assert_eq!(image.rgba.len(), 32 * 18 * 4);

        let image = decode(&encode(10, 100, &gradient(10, 100)).unwrap()).unwrap();
        assert_eq!((image.width, image.height), (5, 32));
    }

    #[test]
    fn test_decode_length_checks() {
        let hash = encode(8, 8, &gradient(8, 8)).unwrap();
        assert!(decode(&hash).is_ok());
        assert!(matches!(
            decode(&hash[..hash.len() - 1]),
            Err(ThumbhashError::MalformedHash(_))
        ));
        let mut longer = hash.clone();
        longer.push(0);
        assert!(matches!(
            decode(&longer),
            Err(ThumbhashError::MalformedHash(_))
        ));
        assert!(decode(&hash[..3]).is_err());
    }

    #[test]
    fn test_decode_solid_color() {
        let hash = encode(6, 6, &[30u8, 144, 255, 255].repeat(36)).unwrap();
        let image = decode(&hash).unwrap();
        let avg = average_rgba(&hash).unwrap();
        for px in image.rgba.chunks_exact(4) {
            assert_eq!(px[0], unit_to_byte(avg.r));
            assert_eq!(px[1], unit_to_byte(avg.g));
            assert_eq!(px[2], unit_to_byte(avg.b));
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_decode_opaque_alpha_is_255() {
        let image = decode(&encode(16, 16, &gradient(16, 16)).unwrap()).unwrap();
        assert!(image.rgba.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_decode_transparent_image() {
        let hash = encode(4, 4, &[255u8, 255, 255, 0].repeat(16)).unwrap();
        let image = decode(&hash).unwrap();
        assert!(image.rgba.chunks_exact(4).all(|px| px[3] == 0));
        assert_eq!(average_rgba(&hash).unwrap().a, 0.0);
    }
}
