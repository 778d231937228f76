//! Forward and inverse DCT of a single LPQA channel.
//!
//! Unlike a rectangular DCT, a ThumbHash channel keeps only the frequency
//! pairs under the diagonal `cx / nx + cy / ny < 1`, which spends the
//! coefficient budget on low frequencies. The traversal order produced by
//! [`frequencies`] is the order coefficients appear in the hash.

use std::f64::consts::PI;

use crate::error::ThumbhashError;

/// Iterate the AC frequency pairs `(cx, cy)` of an `nx` x `ny` channel in
/// wire order.
///
/// For each row `cy` in `0..ny`, `cx` counts up from 0 (from 1 on the first
/// row, since `(0, 0)` is the DC term) while `cx * ny < nx * (ny - cy)`.
///
/// # Examples
///
/// ```
/// use thumbhash_core::channel::frequencies;
/// let pairs: Vec<_> = frequencies(3, 3).collect();
/// assert_eq!(pairs, [(1, 0), (2, 0), (0, 1), (1, 1), (0, 2)]);
/// ```
pub fn frequencies(nx: usize, ny: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..ny).flat_map(move |cy| {
        let start = if cy > 0 { 0 } else { 1 };
        (start..)
            .take_while(move |&cx| cx * ny < nx * (ny - cy))
            .map(move |cx| (cx, cy))
    })
}

/// Number of AC coefficients stored for an `nx` x `ny` channel.
///
/// # Examples
///
/// ```
/// use thumbhash_core::channel::ac_count;
/// assert_eq!(ac_count(7, 7), 27);
/// assert_eq!(ac_count(3, 3), 5);
/// assert_eq!(ac_count(5, 5), 14);
/// ```
pub fn ac_count(nx: usize, ny: usize) -> usize {
    frequencies(nx, ny).count()
}

/// Cosine table for the forward transform, indexed `[freq][pos]`.
fn analysis_table(len: usize, freqs: usize) -> Vec<Vec<f64>> {
    let lf = len as f64;
    (0..freqs)
        .map(|f| {
            (0..len)
                .map(|pos| (PI / lf * f as f64 * (pos as f64 + 0.5)).cos())
                .collect()
        })
        .collect()
}

/// Cosine table for reconstruction, indexed `[pos][freq]` so that one row
/// holds every basis value a single output column (or row) needs.
///
/// # Examples
///
/// ```
/// use thumbhash_core::channel::synthesis_table;
/// let table = synthesis_table(32, 7);
/// assert_eq!(table.len(), 32);
/// assert_eq!(table[0].len(), 7);
/// assert_eq!(table[5][0], 1.0);
/// ```
pub fn synthesis_table(len: usize, freqs: usize) -> Vec<Vec<f64>> {
    let lf = len as f64;
    (0..len)
        .map(|pos| {
            (0..freqs)
                .map(|f| (PI / lf * (pos as f64 + 0.5) * f as f64).cos())
                .collect()
        })
        .collect()
}

/// One scalar channel expanded into a DC term and triangular AC terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Horizontal frequency bound.
    pub nx: usize,
    /// Vertical frequency bound.
    pub ny: usize,
    /// Zero-frequency term (the channel mean).
    pub dc: f64,
    /// Largest absolute AC value before normalization.
    pub scale: f64,
    /// AC terms in [`frequencies`] order. After [`Channel::encode`] they are
    /// normalized into `0.0..=1.0`; after [`Channel::decode`] they are signed.
    pub ac: Vec<f64>,
}

impl Channel {
    /// Run the forward transform over a `w` x `h` plane of values.
    ///
    /// `values` must hold `w * h` samples in row-major order.
    pub fn encode(values: &[f64], w: usize, h: usize, nx: usize, ny: usize) -> Self {
        debug_assert_eq!(values.len(), w * h);

        let cos_x = analysis_table(w, nx);
        let cos_y = analysis_table(h, ny);
        let norm = (w * h) as f64;

        let project = |cx: usize, cy: usize| -> f64 {
            let fx = &cos_x[cx];
            let mut f = 0.0f64;
            for (y, row) in values.chunks_exact(w).enumerate() {
                let fy = cos_y[cy][y];
                for (x, &v) in row.iter().enumerate() {
                    f += v * fx[x] * fy;
                }
            }
            f / norm
        };

        let dc = project(0, 0);
        let mut ac = Vec::with_capacity(ac_count(nx, ny));
        let mut scale = 0.0f64;
        for (cx, cy) in frequencies(nx, ny) {
            let f = project(cx, cy);
            scale = f.abs().max(scale);
            ac.push(f);
        }
        if scale > 0.0 {
            for v in &mut ac {
                *v = 0.5 + 0.5 / scale * *v;
            }
        }

        Self {
            nx,
            ny,
            dc,
            scale,
            ac,
        }
    }

    /// Rebuild a channel from its header terms and a stream of 4-bit
    /// quantized AC values.
    ///
    /// Each nibble `n` dequantizes to `(n / 7.5 - 1) * scale`. Pass a boosted
    /// `scale` for chroma channels.
    ///
    /// # Errors
    ///
    /// Returns [`ThumbhashError::MalformedHash`] if `nibbles` runs out before
    /// every coefficient has been read.
    pub fn decode<I>(
        nx: usize,
        ny: usize,
        dc: f64,
        scale: f64,
        nibbles: &mut I,
    ) -> Result<Self, ThumbhashError>
    where
        I: Iterator<Item = u8>,
    {
        let count = ac_count(nx, ny);
        let mut ac = Vec::with_capacity(count);
        for _ in 0..count {
            let bits = nibbles.next().ok_or_else(|| {
                ThumbhashError::MalformedHash(format!(
                    "AC data ended early for {nx}x{ny} channel"
                ))
            })?;
            ac.push((bits as f64 / 7.5 - 1.0) * scale);
        }
        Ok(Self {
            nx,
            ny,
            dc,
            scale,
            ac,
        })
    }

    /// Evaluate the channel at one output pixel.
    ///
    /// `fx` and `fy` are that pixel's rows of a [`synthesis_table`] and must
    /// cover at least `nx` and `ny` frequencies.
    #[inline]
    pub fn sample(&self, fx: &[f64], fy: &[f64]) -> f64 {
        let mut value = self.dc;
        for ((cx, cy), &ac) in frequencies(self.nx, self.ny).zip(&self.ac) {
            value += ac * fx[cx] * (fy[cy] * 2.0);
        }
        value
    }
}

/// Evaluate two channels with the same bounds at one output pixel, sharing
/// each basis product `fx * 2 * fy` between them.
///
/// Used for the P and Q pair. The product is formed before multiplying by the
/// coefficient, so results can differ from two [`Channel::sample`] calls in
/// the last bit.
#[inline]
pub fn sample_pair(first: &Channel, second: &Channel, fx: &[f64], fy: &[f64]) -> (f64, f64) {
    debug_assert_eq!((first.nx, first.ny), (second.nx, second.ny));
    let mut a = first.dc;
    let mut b = second.dc;
    for (((cx, cy), &ac_a), &ac_b) in frequencies(first.nx, first.ny)
        .zip(&first.ac)
        .zip(&second.ac)
    {
        let f = fx[cx] * (fy[cy] * 2.0);
        a += ac_a * f;
        b += ac_b * f;
    }
    (a, b)
}
