//! PNG image format support
//!
//! Decoding expands palettes, sub-byte grayscale and `tRNS` transparency
//! through the `png` crate, so only 8- and 16-bit gray/RGB layouts (with
//! or without alpha) reach the sample conversion.

use crate::luma::pixel_intensity;
use crate::{IoError, IoResult};
use edgemap_core::{GrayImage, ScalarField};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as a grayscale intensity field in [0, 1]
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<ScalarField> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };
    let sample_bytes = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output depth: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let pixel_bytes = channels * sample_bytes;
    let used = width as usize * pixel_bytes;
    if bytes_per_row < used || buf.len() < bytes_per_row * height as usize {
        return Err(IoError::InvalidData(format!(
            "PNG frame too small for {}x{} {:?}",
            width, height, color_type
        )));
    }

    let mut field = ScalarField::new(width, height)?;
    let mut samples = [0.0f64; 4];
    for (y, dst_row) in field.data_mut().chunks_exact_mut(width as usize).enumerate() {
        let row_start = y * bytes_per_row;
        let src_row = &buf[row_start..row_start + used];
        for (dst, pixel) in dst_row.iter_mut().zip(src_row.chunks_exact(pixel_bytes)) {
            for (c, sample) in samples[..channels].iter_mut().enumerate() {
                *sample = if sample_bytes == 2 {
                    let hi = pixel[c * 2] as u16;
                    let lo = pixel[c * 2 + 1] as u16;
                    ((hi << 8) | lo) as f64 / 65535.0
                } else {
                    pixel[c] as f64 / 255.0
                };
            }
            *dst = pixel_intensity(&samples[..channels]);
        }
    }

    Ok(field)
}

/// Write an 8-bit grayscale PNG
pub fn write_png<W: Write>(image: &GrayImage, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
