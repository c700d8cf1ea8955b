//! Texture bitmap loading.
//!
//! Textures are decoded once at startup and held for the process lifetime.
//! A missing or undecodable required texture is fatal: the error propagates
//! out of `main` and the process terminates.

use deskscape_scene::{SceneError, TextureBank, REQUIRED_TEXTURES};
use std::path::{Path, PathBuf};

/// Errors from texture loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A decoded RGBA8 bitmap tagged for later lookup.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub tag: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode one bitmap file into RGBA8.
pub fn load_texture(path: &Path, tag: &str) -> Result<TextureImage, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_owned(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::info!(tag, path = %path.display(), width, height, "texture loaded");
    Ok(TextureImage {
        tag: tag.to_owned(),
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Load the scene's required texture set from `dir`, registering each tag
/// in the bank. Returned images are in slot order. Any failure aborts the
/// whole load.
pub fn load_scene_textures(
    dir: &Path,
    bank: &mut TextureBank,
) -> Result<Vec<TextureImage>, AssetError> {
    let mut images = Vec::with_capacity(REQUIRED_TEXTURES.len());
    for (tag, file) in REQUIRED_TEXTURES {
        let image = load_texture(&dir.join(file), tag)?;
        bank.register(tag)?;
        images.push(image);
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbaImage::new(w, h);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgba([x as u8, y as u8, 128, 255]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn decode_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "t.png", 4, 2);

        let tex = load_texture(&path, "t").unwrap();
        assert_eq!(tex.tag, "t");
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.pixels.len(), 4 * 2 * 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_texture(&dir.path().join("absent.png"), "x").unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }

    #[test]
    fn scene_set_loads_and_registers_tags() {
        let dir = tempfile::tempdir().unwrap();
        for (_, file) in REQUIRED_TEXTURES {
            write_test_png(dir.path(), file, 2, 2);
        }

        let mut bank = TextureBank::new();
        let images = load_scene_textures(dir.path(), &mut bank).unwrap();
        assert_eq!(images.len(), REQUIRED_TEXTURES.len());
        assert_eq!(bank.len(), REQUIRED_TEXTURES.len());
        for (i, (tag, _)) in REQUIRED_TEXTURES.iter().enumerate() {
            assert_eq!(bank.slot(tag), Some(i as u32));
            assert_eq!(images[i].tag, *tag);
        }
    }

    #[test]
    fn scene_set_fails_when_one_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        // Write all but the last required file.
        for (_, file) in &REQUIRED_TEXTURES[..REQUIRED_TEXTURES.len() - 1] {
            write_test_png(dir.path(), file, 2, 2);
        }

        let mut bank = TextureBank::new();
        assert!(load_scene_textures(dir.path(), &mut bank).is_err());
    }
}
