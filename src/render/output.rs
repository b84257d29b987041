use crate::error::{OutputError, RenderError};
use image::codecs::pnm::{PNMSubtype, SampleEncoding};
use image::{DynamicImage, ImageFormat, ImageOutputFormat, RgbImage};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const JPEG_QUALITY: u8 = 95;

fn output_format(path: &Path) -> ImageOutputFormat {
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Png) => ImageOutputFormat::Png,
        Ok(ImageFormat::Jpeg) => ImageOutputFormat::Jpeg(JPEG_QUALITY),
        _ => ImageOutputFormat::Pnm(PNMSubtype::Pixmap(SampleEncoding::Binary)),
    }
}

fn encode(path: &Path, image: DynamicImage) -> Result<(), OutputError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let file = NamedTempFile::new_in(directory)?;
    {
        let mut writer = BufWriter::new(file.as_file());
        image.write_to(&mut writer, output_format(path))?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Encodes a row-major raster of `height` rows of `width` pixels to `path`.
///
/// The format follows the extension: PNG and JPEG are recognized, anything else becomes a
/// binary PPM. The target is only replaced once encoding has fully succeeded.
pub fn write_image(
    path: &Path,
    width: u32,
    height: u32,
    raster: &[[u8; 3]],
) -> Result<(), RenderError> {
    let wrap = |source: OutputError| RenderError::Output {
        path: path.to_path_buf(),
        source,
    };

    let image = RgbImage::from_raw(width, height, raster.concat()).ok_or_else(|| {
        wrap(OutputError::SizeMismatch {
            width,
            height,
            actual: raster.len(),
        })
    })?;
    encode(path, DynamicImage::ImageRgb8(image)).map_err(wrap)?;

    log::debug!("wrote {}x{} image to {}", width, height, path.display());
    Ok(())
}
