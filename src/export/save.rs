use std::path::{Path, PathBuf};

use super::rasterizer::EncodedImage;
use crate::error::ExportError;

pub const EXPORT_FILE_NAME: &str = "pixel-art.png";

/// Where a saved image ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    File(PathBuf),
    /// Handed to the browser as a download with this file name
    Download(&'static str),
}

impl std::fmt::Display for Saved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "saved to {}", path.display()),
            Self::Download(name) => write!(f, "downloading {}", name),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_image(image: &EncodedImage, dir: &Path) -> Result<Saved, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, image.bytes())?;
    log::info!("Saved export {} to {}", image.id(), path.display());
    Ok(Saved::File(path))
}

#[cfg(target_arch = "wasm32")]
pub fn save_image(image: &EncodedImage, _dir: &Path) -> Result<Saved, ExportError> {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    let js_err = |err: JsValue| ExportError::Web(format!("{:?}", err));

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Web("no document available".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Web("created element is not an anchor".to_owned()))?;

    anchor.set_href(&image.to_data_uri());
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();

    log::info!("Started download of export {}", image.id());
    Ok(Saved::Download(EXPORT_FILE_NAME))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::export::rasterizer::PNG_MIME;

    #[test]
    fn test_save_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("pixel_studio_save_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let image = EncodedImage::new(PNG_MIME, vec![1, 2, 3], 1, 1);

        let saved = save_image(&image, &dir).unwrap();
        assert_eq!(saved, Saved::File(dir.join(EXPORT_FILE_NAME)));
        assert_eq!(std::fs::read(dir.join(EXPORT_FILE_NAME)).unwrap(), vec![1, 2, 3]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = std::env::temp_dir().join(format!("pixel_studio_missing_{}", uuid::Uuid::new_v4()));
        let image = EncodedImage::new(PNG_MIME, vec![0], 1, 1);
        assert!(matches!(save_image(&image, &dir), Err(ExportError::Io(_))));
    }
}
