use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write frame: {0}")]
    Io(#[from] std::io::Error),
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("buffer holds {got} bytes, expected {expected} for {width}x{height} RGBA")]
    Size { got: usize, expected: usize, width: usize, height: usize },
}

/// Write an RGBA buffer as an 8-bit PNG.
pub fn write_png(path: &Path, rgba: &[u8], width: usize, height: usize) -> Result<(), ExportError> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(ExportError::Size { got: rgba.len(), expected, width, height });
    }
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    log::info!("wrote {}x{} frame to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_roundtrip_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let (w, h) = (4usize, 3usize);
        let mut rgba = vec![255u8; w * h * 4];
        rgba[0] = 10; // top-left red channel
        write_png(&path, &rgba, w, h).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut out = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut out).unwrap();
        assert_eq!(info.width, 4);
        assert_eq!(info.height, 3);
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&out[..4], &[10, 255, 255, 255]);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&dir.path().join("x.png"), &[0u8; 7], 2, 2).unwrap_err();
        assert!(matches!(err, ExportError::Size { got: 7, expected: 16, .. }));
    }
}
