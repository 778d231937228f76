//! ThumbHash encoding: convert a small RGBA image into hash bytes.
//!
//! The encoder composites the image over its average color, splits it into
//! LPQA planes, runs the triangular DCT on each plane and packs the quantized
//! terms into the layout described in [`crate::packing`].

use tracing::debug;

use crate::channel::Channel;
use crate::color::{average_color, rgba_to_lpqa};
use crate::error::ThumbhashError;
use crate::packing::{
    hash_len, luma_limit, quantize, quantize_signed, AlphaHeader, Header, NibbleWriter,
    ALPHA_BOUND, CHROMA_BOUND,
};

/// Largest accepted input width or height. Bigger images gain nothing and
/// should be downscaled by the caller first.
pub const MAX_DIMENSION: u32 = 100;

/// Encode an RGBA image into a ThumbHash.
///
/// # Arguments
///
/// * `width` - Image width in pixels (1..=100).
/// * `height` - Image height in pixels (1..=100).
/// * `rgba` - Flat RGBA byte array in row-major order (4 bytes per pixel).
///   RGB is not premultiplied by alpha.
///
/// # Errors
///
/// Returns [`ThumbhashError::InvalidDimensions`] if either dimension is zero
/// or larger than 100, and [`ThumbhashError::BufferLengthMismatch`] if the
/// buffer length is not `width * height * 4`.
///
/// # Examples
///
/// ```
/// use thumbhash_core::encode;
/// // A 2x2 opaque red image
/// let pixels = [255u8, 0, 0, 255].repeat(4);
/// let hash = encode(2, 2, &pixels).unwrap();
/// assert_eq!(hash[2] & 0x80, 0); // no alpha
/// ```
pub fn encode(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ThumbhashError> {
    if width == 0 || height == 0 {
        return Err(ThumbhashError::InvalidDimensions {
            width,
            height,
            reason: "width and height must be > 0",
        });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ThumbhashError::InvalidDimensions {
            width,
            height,
            reason: "dimensions must be <= 100",
        });
    }

    let w = width as usize;
    let h = height as usize;
    let expected_len = w * h * 4;
    if rgba.len() != expected_len {
        return Err(ThumbhashError::BufferLengthMismatch {
            expected: expected_len,
            actual: rgba.len(),
        });
    }

    let (avg, has_alpha) = average_color(rgba);

    // Fewer luminance terms when alpha needs room.
    let limit = luma_limit(has_alpha) as f64;
    let long_side = w.max(h) as f64;
    let lx = ((limit * w as f64 / long_side).round() as usize).max(1);
    let ly = ((limit * h as f64 / long_side).round() as usize).max(1);

    let planes = rgba_to_lpqa(rgba, &avg);
    let l_channel = Channel::encode(&planes.l, w, h, lx.max(3), ly.max(3));
    let p_channel = Channel::encode(&planes.p, w, h, CHROMA_BOUND, CHROMA_BOUND);
    let q_channel = Channel::encode(&planes.q, w, h, CHROMA_BOUND, CHROMA_BOUND);
    let a_channel =
        has_alpha.then(|| Channel::encode(&planes.a, w, h, ALPHA_BOUND, ALPHA_BOUND));

    let is_landscape = w > h;
    let header = Header {
        l_dc: quantize(l_channel.dc, 63.0, 63),
        p_dc: quantize_signed(p_channel.dc),
        q_dc: quantize_signed(q_channel.dc),
        l_scale: quantize(l_channel.scale, 31.0, 31),
        has_alpha,
        short_bound: (if is_landscape { ly } else { lx }) as u8,
        p_scale: quantize(p_channel.scale, 63.0, 63),
        q_scale: quantize(q_channel.scale, 63.0, 63),
        is_landscape,
    };

    let mut hash = Vec::with_capacity(hash_len(lx, ly, has_alpha));
    hash.extend_from_slice(&header.to_bytes());
    if let Some(a) = &a_channel {
        let alpha = AlphaHeader {
            dc: quantize(a.dc, 15.0, 15),
            scale: quantize(a.scale, 15.0, 15),
        };
        hash.push(alpha.to_byte());
    }

    let mut writer = NibbleWriter::new(&mut hash);
    for channel in [&l_channel, &p_channel, &q_channel]
        .into_iter()
        .chain(a_channel.as_ref())
    {
        for &v in &channel.ac {
            writer.push_unit(v);
        }
    }

    debug!(
        width,
        height,
        lx,
        ly,
        has_alpha,
        len = hash.len(),
        "encoded thumbhash"
    );
    Ok(hash)
}
