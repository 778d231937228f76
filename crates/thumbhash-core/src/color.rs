//! Color space conversion between RGBA8 pixels and the LPQA representation.
//!
//! ThumbHash does not transform RGB directly. Each pixel is first composited
//! atop the image's average color and then split into luminance (L),
//! yellow-blue (P), red-green (Q) and alpha (A). Luminance carries most of the
//! perceptual detail, so it gets a larger frequency budget than the two chroma
//! channels.

/// An RGBA color with every channel in `0.0..=1.0`. RGB is not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Rgba {
    /// Build a color from LPQ components and an alpha value, clamping every
    /// channel into `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use thumbhash_core::Rgba;
    /// let gray = Rgba::from_lpqa(0.5, 0.0, 0.0, 1.0);
    /// assert!((gray.r - 0.5).abs() < 1e-12);
    /// assert!((gray.g - 0.5).abs() < 1e-12);
    /// assert!((gray.b - 0.5).abs() < 1e-12);
    /// ```
    pub fn from_lpqa(l: f64, p: f64, q: f64, a: f64) -> Self {
        let [r, g, b] = lpq_to_rgb(l, p, q);
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }
}

/// Planar LPQA channels of an image, one value per pixel in row-major order.
#[derive(Debug, Clone, Default)]
pub struct LpqaPlanes {
    /// Luminance.
    pub l: Vec<f64>,
    /// Yellow minus blue.
    pub p: Vec<f64>,
    /// Red minus green.
    pub q: Vec<f64>,
    /// Alpha.
    pub a: Vec<f64>,
}

/// Compute the alpha-weighted average color of an RGBA8 buffer.
///
/// Returns the average color and whether any pixel is not fully opaque. The
/// returned alpha is the mean alpha over all pixels. Fully transparent images
/// average to black.
///
/// # Examples
///
/// ```
/// use thumbhash_core::color::average_color;
/// let (avg, has_alpha) = average_color(&[255, 0, 0, 255, 0, 0, 255, 255]);
/// assert!(!has_alpha);
/// assert!((avg.r - 0.5).abs() < 1e-12);
/// assert!((avg.b - 0.5).abs() < 1e-12);
/// ```
pub fn average_color(rgba: &[u8]) -> (Rgba, bool) {
    let mut avg_r = 0.0f64;
    let mut avg_g = 0.0f64;
    let mut avg_b = 0.0f64;
    let mut avg_a = 0.0f64;
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as f64 / 255.0;
        avg_r += alpha / 255.0 * px[0] as f64;
        avg_g += alpha / 255.0 * px[1] as f64;
        avg_b += alpha / 255.0 * px[2] as f64;
        avg_a += alpha;
    }
    if avg_a > 0.0 {
        avg_r /= avg_a;
        avg_g /= avg_a;
        avg_b /= avg_a;
    }

    let count = (rgba.len() / 4) as f64;
    let has_alpha = avg_a < count;
    let mean_a = if count > 0.0 { avg_a / count } else { 0.0 };
    (
        Rgba {
            r: avg_r,
            g: avg_g,
            b: avg_b,
            a: mean_a,
        },
        has_alpha,
    )
}

/// Convert RGBA8 pixels into LPQA planes, compositing each pixel atop `avg`
/// using the pixel's own alpha.
pub fn rgba_to_lpqa(rgba: &[u8], avg: &Rgba) -> LpqaPlanes {
    let n = rgba.len() / 4;
    let mut planes = LpqaPlanes {
        l: Vec::with_capacity(n),
        p: Vec::with_capacity(n),
        q: Vec::with_capacity(n),
        a: Vec::with_capacity(n),
    };
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as f64 / 255.0;
        let r = avg.r * (1.0 - alpha) + alpha / 255.0 * px[0] as f64;
        let g = avg.g * (1.0 - alpha) + alpha / 255.0 * px[1] as f64;
        let b = avg.b * (1.0 - alpha) + alpha / 255.0 * px[2] as f64;
        planes.l.push((r + g + b) / 3.0);
        planes.p.push((r + g) / 2.0 - b);
        planes.q.push(r - g);
        planes.a.push(alpha);
    }
    planes
}

/// Convert LPQ components back to unclamped linear `[r, g, b]`.
///
/// # Examples
///
/// ```
/// use thumbhash_core::color::lpq_to_rgb;
/// // Pure red: L = 1/3, P = 1/2, Q = 1.
/// let [r, g, b] = lpq_to_rgb(1.0 / 3.0, 0.5, 1.0);
/// assert!((r - 1.0).abs() < 1e-12 && g.abs() < 1e-12 && b.abs() < 1e-12);
/// ```
#[inline]
pub fn lpq_to_rgb(l: f64, p: f64, q: f64) -> [f64; 3] {
    let b = l - 2.0 / 3.0 * p;
    let r = (3.0 * l - b + q) / 2.0;
    let g = r - q;
    [r, g, b]
}

/// Convert a unit value to a byte: clamp to `0.0..=1.0`, scale to 255 and
/// round half away from zero.
///
/// # Examples
///
/// ```
/// use thumbhash_core::color::unit_to_byte;
/// assert_eq!(unit_to_byte(-0.2), 0);
/// assert_eq!(unit_to_byte(0.5), 128);
/// assert_eq!(unit_to_byte(1.7), 255);
/// ```
#[inline]
pub fn unit_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_opaque_solid() {
        let pixels = [10u8, 200, 30, 255].repeat(9);
        let (avg, has_alpha) = average_color(&pixels);
        assert!(!has_alpha);
        assert!((avg.r - 10.0 / 255.0).abs() < 1e-12);
        assert!((avg.g - 200.0 / 255.0).abs() < 1e-12);
        assert!((avg.b - 30.0 / 255.0).abs() < 1e-12);
        assert!((avg.a - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_ignores_transparent_pixels() {
        // A transparent white pixel must not lighten the average.
        let pixels = [0u8, 0, 255, 255, 255, 255, 255, 0];
        let (avg, has_alpha) = average_color(&pixels);
        assert!(has_alpha);
        assert!(avg.r.abs() < 1e-12);
        assert!(avg.g.abs() < 1e-12);
        assert!((avg.b - 1.0).abs() < 1e-12);
        assert!((avg.a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_average_fully_transparent() {
        let pixels = [90u8, 90, 90, 0].repeat(4);
        let (avg, has_alpha) = average_color(&pixels);
        assert!(has_alpha);
        assert_eq!(avg.r, 0.0);
        assert_eq!(avg.a, 0.0);
    }

    #[test]
    fn test_single_translucent_pixel_sets_alpha() {
        let mut pixels = [0u8, 0, 0, 255].repeat(16);
        pixels[63] = 254;
        let (_, has_alpha) = average_color(&pixels);
        assert!(has_alpha);
    }

    #[test]
    fn test_lpqa_roundtrip() {
        let pixels = [
            255u8, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 17, 99, 201, 255,
        ];
        let (avg, _) = average_color(&pixels);
        let planes = rgba_to_lpqa(&pixels, &avg);
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            let [r, g, b] = lpq_to_rgb(planes.l[i], planes.p[i], planes.q[i]);
            assert_eq!(unit_to_byte(r), px[0], "pixel {i} R");
            assert_eq!(unit_to_byte(g), px[1], "pixel {i} G");
            assert_eq!(unit_to_byte(b), px[2], "pixel {i} B");
            assert!((planes.a[i] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transparent_pixel_takes_average_color() {
        let pixels = [200u8, 100, 50, 255, 0, 0, 0, 0];
        let (avg, _) = average_color(&pixels);
        let planes = rgba_to_lpqa(&pixels, &avg);
        assert!((planes.l[0] - planes.l[1]).abs() < 1e-12);
        assert!((planes.p[0] - planes.p[1]).abs() < 1e-12);
        assert!((planes.q[0] - planes.q[1]).abs() < 1e-12);
        assert_eq!(planes.a[1], 0.0);
    }

    #[test]
    fn test_unit_to_byte_rounding() {
        assert_eq!(unit_to_byte(0.0), 0);
        assert_eq!(unit_to_byte(1.0), 255);
        assert_eq!(unit_to_byte(0.6 / 255.0), 1);
        assert_eq!(unit_to_byte(0.4 / 255.0), 0);
        assert_eq!(unit_to_byte(f64::NAN), 0);
    }

    #[test]
    fn test_from_lpqa_clamps() {
        let c = Rgba::from_lpqa(1.0 / 3.0, 0.5, 2.0, 1.5);
        assert!(c.r <= 1.0 && c.g >= 0.0 && c.b >= 0.0);
        assert_eq!(c.a, 1.0);
    }
}
