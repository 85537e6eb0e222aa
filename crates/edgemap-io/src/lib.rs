//! edgemap-io - Image I/O for the edge-map pipeline
//!
//! Reading always yields a single-channel [`ScalarField`] in [0, 1]:
//! color sources are reduced with the luminance weights in [`luma`],
//! alpha is dropped, and 16-bit samples are scaled by 65535.
//!
//! Writing takes an 8-bit [`GrayImage`] (or a field that is quantized on
//! the way out) and stores it as PNG.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | JPEG   | yes  | no    | `jpeg` |

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
pub mod luma;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use edgemap_core::{GrayImage, ScalarField};
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image file as a grayscale intensity field.
///
/// The format is detected from the file header, not the extension.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened,
/// [`IoError::UnsupportedFormat`] for unrecognized or disabled formats, and
/// [`IoError::DecodeError`] for corrupt data.
pub fn read_gray_field<P: AsRef<Path>>(path: P) -> IoResult<ScalarField> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let field = read_gray_field_with_format(BufReader::new(file), format)?;
    debug!(
        "read {} ({}, {}x{})",
        path.display(),
        format,
        field.width(),
        field.height()
    );
    Ok(field)
}

/// Read an in-memory encoded image as a grayscale intensity field.
pub fn read_gray_field_mem(data: &[u8]) -> IoResult<ScalarField> {
    let format = detect_format_from_bytes(data)?;
    read_gray_field_with_format(Cursor::new(data), format)
}

#[allow(unused_variables)]
fn read_gray_field_with_format<R>(reader: R, format: ImageFormat) -> IoResult<ScalarField>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => crate::png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => crate::jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{} support not enabled",
            format
        ))),
    }
}

/// Write an 8-bit grayscale image as PNG, replacing any existing file.
#[cfg(feature = "png-format")]
pub fn write_gray_png<P: AsRef<Path>>(image: &GrayImage, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    crate::png::write_png(image, &mut writer)?;
    writer.flush()?;
    debug!(
        "wrote {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

/// Encode an 8-bit grayscale image as PNG bytes.
#[cfg(feature = "png-format")]
pub fn write_gray_png_mem(image: &GrayImage) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    crate::png::write_png(image, &mut buffer)?;
    Ok(buffer)
}

/// Quantize a [0, 1] field to 8 bits and write it as PNG.
///
/// See [`ScalarField::to_gray_image`] for the quantization rule.
#[cfg(feature = "png-format")]
pub fn write_field_png<P: AsRef<Path>>(field: &ScalarField, path: P) -> IoResult<()> {
    write_gray_png(&field.to_gray_image(), path)
}

#[cfg(all(test, feature = "png-format"))]
mod tests {
    use super::*;

    #[test]
    fn test_mem_roundtrip() {
        let image = GrayImage::from_data(3, 2, vec![0, 50, 100, 150, 200, 255]).unwrap();
        let bytes = write_gray_png_mem(&image).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);
        let field = read_gray_field_mem(&bytes).unwrap();
        assert_eq!(field.to_gray_image(), image);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_gray_field("/nonexistent/input.png"),
            Err(IoError::Io(_))
        ));
    }

    #[test]
    fn test_read_unknown_bytes() {
        assert!(matches!(
            read_gray_field_mem(b"GIF89a\x01\x00\x01\x00"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
