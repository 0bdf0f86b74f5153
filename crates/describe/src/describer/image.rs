use super::{Describer, Description};
use crate::category::Category;
use crate::error::{ErrorKind, Result};
use crate::fragment::Fragment;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const UNKNOWN_CAMERA: &str = "unknownCamera";
const FALLBACK: &str = "unknownRes_unknownCamera";

/// Describes images as `"{width}x{height}_{camera}"`.
///
/// Dimensions come from the image header. The camera is the EXIF `Model` tag;
/// an image without EXIF is still a successful extraction, just with
/// `unknownCamera` in place of the model. Only an image whose dimensions
/// cannot be read falls back.
pub struct ImageDescriber;

impl ImageDescriber {
    fn dimensions(path: &Path) -> Result<(u32, u32)> {
        image::image_dimensions(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Could not read image dimensions");
            exn::Exn::from(ErrorKind::Decode("image"))
        })
    }

    /// Partial metadata is not an error, so any failure here is just `None`.
    fn camera_model(path: &Path) -> Option<String> {
        let file = File::open(path).ok()?;
        let exif = exif::Reader::new().read_from_container(&mut BufReader::new(file)).ok()?;
        let field = exif.get_field(exif::Tag::Model, exif::In::PRIMARY)?;
        let exif::Value::Ascii(ref values) = field.value else {
            return None;
        };
        let model = values.iter().map(|v| String::from_utf8_lossy(v)).collect::<Vec<_>>().join(" ");
        let model = model.trim_matches(|c: char| c == '\0' || c.is_whitespace());
        (!model.is_empty()).then(|| model.to_string())
    }
}

impl Describer for ImageDescriber {
    fn describe(&self, path: &Path, _category: &Category) -> Description {
        let (width, height) = match Self::dimensions(path) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                return Description::Fallback {
                    fragment: self.fallback(),
                    reason: e.to_string(),
                };
            },
        };
        let camera = Self::camera_model(path).unwrap_or_else(|| UNKNOWN_CAMERA.to_string());
        match Fragment::new(format!("{width}x{height}_{camera}")) {
            Some(fragment) => Description::Extracted(fragment),
            // Infallible: the resolution part is never blank.
            None => Description::Fallback {
                fragment: self.fallback(),
                reason: ErrorKind::Missing("image metadata").to_string(),
            },
        }
    }

    fn fallback(&self) -> Fragment {
        Fragment::literal(FALLBACK)
    }
}
