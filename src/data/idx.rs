//! Readers for the IDX binary files used by MNIST and its derivatives.
//!
//! # IDX3 image file layout
//! ```text
//! bytes  0-3:   magic 2051  (big-endian u32)
//! bytes  4-7:   N           (number of images, big-endian u32)
//! bytes  8-11:  rows        (image height in pixels, big-endian u32)
//! bytes 12-15:  cols        (image width in pixels, big-endian u32)
//! bytes 16..:   N * rows * cols bytes, row-major, uint8
//! ```
//!
//! # IDX1 label file layout
//! ```text
//! bytes  0-3:   magic 2049  (big-endian u32)
//! bytes  4-7:   N           (number of labels, big-endian u32)
//! bytes  8..:   N bytes, each a class index in [0, n_classes)
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

pub const IMAGE_MAGIC: u32 = 2051;
pub const LABEL_MAGIC: u32 = 2049;

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Parses an IDX3 image file into an `(N, rows * cols)` matrix.
///
/// Pixel bytes are kept as raw values in `[0, 255]`; scaling is up to the caller.
pub fn parse_images(bytes: &[u8]) -> Result<Matrix> {
    if bytes.len() < 16 {
        return Err(Error::invalid(format!(
            "IDX image file too short: expected at least 16 header bytes, got {}",
            bytes.len()
        )));
    }

    let magic = read_u32(bytes, 0);
    if magic != IMAGE_MAGIC {
        return Err(Error::invalid(format!(
            "IDX image file: magic number {magic} does not match {IMAGE_MAGIC}"
        )));
    }

    let n_items = read_u32(bytes, 4) as usize;
    let rows = read_u32(bytes, 8) as usize;
    let cols = read_u32(bytes, 12) as usize;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        Error::invalid(format!(
            "IDX image file: rows * cols overflows usize (rows={rows}, cols={cols})"
        ))
    })?;
    let data_len = n_items.checked_mul(n_pixels).ok_or_else(|| {
        Error::invalid(format!(
            "IDX image file: n_items * n_pixels overflows usize (n_items={n_items}, n_pixels={n_pixels})"
        ))
    })?;

    if bytes.len() - 16 < data_len {
        return Err(Error::invalid(format!(
            "IDX image file too short: header declares {n_items} items of {rows}x{cols} pixels \
             ({data_len} data bytes), but only {} bytes follow the header",
            bytes.len() - 16
        )));
    }

    let data = bytes[16..16 + data_len].iter().map(|&px| px as f64).collect();
    Matrix::from_vec(n_items, n_pixels, data)
}

/// Parses an IDX1 label file into an `(N, n_classes)` one-hot matrix.
pub fn parse_labels(bytes: &[u8], n_classes: usize) -> Result<Matrix> {
    if bytes.len() < 8 {
        return Err(Error::invalid(format!(
            "IDX label file too short: expected at least 8 header bytes, got {}",
            bytes.len()
        )));
    }

    let magic = read_u32(bytes, 0);
    if magic != LABEL_MAGIC {
        return Err(Error::invalid(format!(
            "IDX label file: magic number {magic} does not match {LABEL_MAGIC}"
        )));
    }

    let n_items = read_u32(bytes, 4) as usize;
    if bytes.len() - 8 < n_items {
        return Err(Error::invalid(format!(
            "IDX label file too short: header declares {n_items} labels but only {} bytes follow the header",
            bytes.len() - 8
        )));
    }

    let mut labels = Matrix::zeros(n_items, n_classes);
    for (i, &class_idx) in bytes[8..8 + n_items].iter().enumerate() {
        let class = class_idx as usize;
        if class >= n_classes {
            return Err(Error::invalid(format!(
                "IDX label at index {i}: class index {class} is out of range for n_classes={n_classes}"
            )));
        }
        labels.set(i, class, 1.0)?;
    }
    Ok(labels)
}

pub fn load_images(path: impl AsRef<Path>) -> Result<Matrix> {
    parse_images(&std::fs::read(path)?)
}

pub fn load_labels(path: impl AsRef<Path>, n_classes: usize) -> Result<Matrix> {
    parse_labels(&std::fs::read(path)?, n_classes)
}
