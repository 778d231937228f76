use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

/// Convert a `ThumbhashError` into a Python `ValueError`.
fn to_py_err(e: thumbhash_core::ThumbhashError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Encode RGBA pixel data into a ThumbHash.
///
/// Args:
///     data: Raw pixel bytes in RGBA order (length must be width * height * 4).
///     width: Image width in pixels (1..=100).
///     height: Image height in pixels (1..=100).
///
/// Returns:
///     The ThumbHash as a bytes object.
#[pyfunction]
fn encode(py: Python<'_>, data: &[u8], width: u32, height: u32) -> PyResult<Py<PyBytes>> {
    let hash = thumbhash_core::encode(width, height, data).map_err(to_py_err)?;
    Ok(PyBytes::new(py, &hash).into())
}

/// Decode a ThumbHash into raw RGBA pixel data.
///
/// Args:
///     hash: The ThumbHash bytes.
///
/// Returns:
///     A tuple (width, height, pixels) where pixels is a bytes object of
///     length width * height * 4.
#[pyfunction]
fn decode(py: Python<'_>, hash: &[u8]) -> PyResult<(u32, u32, Py<PyBytes>)> {
    let image = thumbhash_core::decode(hash).map_err(to_py_err)?;
    Ok((
        image.width,
        image.height,
        PyBytes::new(py, &image.rgba).into(),
    ))
}

/// Extract the average color from a ThumbHash.
///
/// Returns:
///     A tuple (r, g, b, a) with each value in 0.0-1.0.
#[pyfunction]
fn average_rgba(hash: &[u8]) -> PyResult<(f64, f64, f64, f64)> {
    let c = thumbhash_core::average_rgba(hash).map_err(to_py_err)?;
    Ok((c.r, c.g, c.b, c.a))
}

/// Extract the approximate aspect ratio (width / height) from a ThumbHash.
#[pyfunction]
fn approximate_aspect_ratio(hash: &[u8]) -> PyResult<f64> {
    thumbhash_core::approximate_aspect_ratio(hash).map_err(to_py_err)
}

/// ThumbHash image placeholders (Rust-powered).
#[pymodule]
fn thumbhash(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(average_rgba, m)?)?;
    m.add_function(wrap_pyfunction!(approximate_aspect_ratio, m)?)?;
    Ok(())
}
