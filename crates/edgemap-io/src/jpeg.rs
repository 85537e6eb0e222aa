//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale (8 and 16
//! bit), RGB and CMYK sources are reduced to a single intensity channel.
//! Writing is not supported; edge maps are always stored as PNG.

use crate::luma::luminance;
use crate::{IoError, IoResult};
use edgemap_core::ScalarField;
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image as a grayscale intensity field in [0, 1]
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<ScalarField> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG image info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let count = width as usize * height as usize;

    let data: Vec<f64> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| v as f64 / 255.0).collect(),
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]) as f64 / 65535.0)
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| luminance(c[0] as f64 / 255.0, c[1] as f64 / 255.0, c[2] as f64 / 255.0))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|c| {
                let k = 1.0 - c[3] as f64 / 255.0;
                let r = (1.0 - c[0] as f64 / 255.0) * k;
                let g = (1.0 - c[1] as f64 / 255.0) * k;
                let b = (1.0 - c[2] as f64 / 255.0) * k;
                luminance(r, g, b)
            })
            .collect(),
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    if data.len() != count {
        return Err(IoError::InvalidData(format!(
            "JPEG decoded {} samples, expected {} for {}x{}",
            data.len(),
            count,
            width,
            height
        )));
    }

    Ok(ScalarField::from_data(width, height, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpeg_encoder::{ColorType, Encoder};

    fn encode(data: &[u8], width: u16, height: u16, color: ColorType) -> Vec<u8> {
        let mut buf = Vec::new();
        Encoder::new(&mut buf, 100)
            .encode(data, width, height, color)
            .unwrap();
        buf
    }

    #[test]
    fn test_read_jpeg_gray() {
        let data = vec![128u8; 16 * 16];
        let bytes = encode(&data, 16, 16, ColorType::Luma);
        let field = read_jpeg(bytes.as_slice()).unwrap();
        assert_eq!(field.dimensions(), (16, 16));
        for &v in field.data() {
            assert!((v - 128.0 / 255.0).abs() < 3.0 / 255.0, "{}", v);
        }
    }

    #[test]
    fn test_read_jpeg_rgb_luminance() {
        // Uniform green: luminance close to the green weight
        let data: Vec<u8> = std::iter::repeat([0u8, 255, 0]).take(16 * 8).flatten().collect();
        let bytes = encode(&data, 16, 8, ColorType::Rgb);
        let field = read_jpeg(bytes.as_slice()).unwrap();
        assert_eq!(field.dimensions(), (16, 8));
        let mean = field.mean();
        assert!((mean - crate::luma::LUMA_G).abs() < 0.03, "{}", mean);
    }

    #[test]
    fn test_read_jpeg_truncated() {
        let data = vec![200u8; 8 * 8];
        let mut bytes = encode(&data, 8, 8, ColorType::Luma);
        // Cut inside the header segments
        bytes.truncate(20);
        assert!(read_jpeg(bytes.as_slice()).is_err());
    }
}
