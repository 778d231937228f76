use napi::bindgen_prelude::*;
use napi::Task;
use napi_derive::napi;

fn to_napi_err(e: thumbhash_core::ThumbhashError) -> Error {
    Error::from_reason(e.to_string())
}

/// A decoded placeholder image.
#[napi(object)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Buffer,
}

impl From<thumbhash_core::Image> for DecodedImage {
    fn from(image: thumbhash_core::Image) -> Self {
        Self {
            width: image.width,
            height: image.height,
            rgba: Buffer::from(image.rgba),
        }
    }
}

/// Average color of a ThumbHash, each channel in 0.0-1.0.
#[napi(object)]
pub struct AverageColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Encode RGBA pixel data into a ThumbHash.
///
/// @param data - Raw pixel bytes in RGBA order (length must be width * height * 4).
/// @param width - Image width in pixels (1..=100).
/// @param height - Image height in pixels (1..=100).
/// @returns The ThumbHash bytes.
#[napi]
pub fn encode(data: Buffer, width: u32, height: u32) -> Result<Buffer> {
    let hash = thumbhash_core::encode(width, height, data.as_ref()).map_err(to_napi_err)?;
    Ok(Buffer::from(hash))
}

/// Encode from a Uint8Array (for browser/Deno compatibility).
///
/// @param data - Raw pixel bytes as Uint8Array in RGBA order.
/// @param width - Image width in pixels (1..=100).
/// @param height - Image height in pixels (1..=100).
/// @returns The ThumbHash bytes as a Uint8Array.
#[napi]
pub fn encode_from_uint8_array(data: Uint8Array, width: u32, height: u32) -> Result<Uint8Array> {
    let hash = thumbhash_core::encode(width, height, data.as_ref()).map_err(to_napi_err)?;
    Ok(Uint8Array::from(hash))
}

/// Decode a ThumbHash into an RGBA placeholder image.
///
/// @param hash - The ThumbHash bytes.
/// @returns An object with width, height and rgba fields.
#[napi]
pub fn decode(hash: Buffer) -> Result<DecodedImage> {
    let image = thumbhash_core::decode(hash.as_ref()).map_err(to_napi_err)?;
    Ok(image.into())
}

/// Extract the average color from a ThumbHash.
///
/// @param hash - The ThumbHash bytes.
/// @returns An object with r, g, b and a fields in 0.0-1.0.
#[napi]
pub fn average_rgba(hash: Buffer) -> Result<AverageColor> {
    let c = thumbhash_core::average_rgba(hash.as_ref()).map_err(to_napi_err)?;
    Ok(AverageColor {
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    })
}

/// Extract the approximate aspect ratio (width / height) from a ThumbHash.
#[napi]
pub fn approximate_aspect_ratio(hash: Buffer) -> Result<f64> {
    thumbhash_core::approximate_aspect_ratio(hash.as_ref()).map_err(to_napi_err)
}

// --- Async versions (run on libuv thread pool) ---

pub struct EncodeTask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Task for EncodeTask {
    type Output = Vec<u8>;
    type JsValue = Buffer;

    fn compute(&mut self) -> Result<Self::Output> {
        thumbhash_core::encode(self.width, self.height, &self.data).map_err(to_napi_err)
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
        Ok(Buffer::from(output))
    }
}

/// Async version of encode that runs on the libuv thread pool.
/// Returns a Promise<Buffer>.
///
/// @param data - Raw pixel bytes in RGBA order (length must be width * height * 4).
/// @param width - Image width in pixels (1..=100).
/// @param height - Image height in pixels (1..=100).
/// @returns A Promise resolving to the ThumbHash bytes.
#[napi]
pub fn encode_async(data: Buffer, width: u32, height: u32) -> AsyncTask<EncodeTask> {
    AsyncTask::new(EncodeTask {
        data: data.to_vec(),
        width,
        height,
    })
}

pub struct DecodeTask {
    hash: Vec<u8>,
}

impl Task for DecodeTask {
    type Output = thumbhash_core::Image;
    type JsValue = DecodedImage;

    fn compute(&mut self) -> Result<Self::Output> {
        thumbhash_core::decode(&self.hash).map_err(to_napi_err)
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
        Ok(output.into())
    }
}

/// Async version of decode that runs on the libuv thread pool.
/// Returns a Promise<DecodedImage>.
///
/// @param hash - The ThumbHash bytes.
/// @returns A Promise resolving to an object with width, height and rgba fields.
#[napi]
pub fn decode_async(hash: Buffer) -> AsyncTask<DecodeTask> {
    AsyncTask::new(DecodeTask {
        hash: hash.to_vec(),
    })
}
