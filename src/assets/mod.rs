//! # Image Assets
//!
//! Catalogue of the controller images, asynchronous loading and the texture store
//! the renderer is gated on.
//!
//! ## Loading Pipeline
//! ```text
//! tokio::fs::read ──► spawn_blocking(PNG decode) ──► mpsc ──► UI thread ──► egui texture
//! ```
//! Each image is loaded by its own task. The UI drains the channel once per frame
//! with [`AssetStore::poll`]; until every image has arrived the renderer skips frames.

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions, Vec2};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Every image the diagram can draw. File names are `<stem>.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    A,
    ArrowsHorizontal,
    ArrowsVertical,
    B,
    Base,
    Dpad,
    Lb,
    LeftStick,
    Lt,
    Menu,
    Rb,
    RightStick,
    Rt,
    Share,
    View,
    X,
    Y,
}

impl ImageId {
    pub const ALL: [ImageId; 17] = [
        ImageId::A,
        ImageId::ArrowsHorizontal,
        ImageId::ArrowsVertical,
        ImageId::B,
        ImageId::Base,
        ImageId::Dpad,
        ImageId::Lb,
        ImageId::LeftStick,
        ImageId::Lt,
        ImageId::Menu,
        ImageId::Rb,
        ImageId::RightStick,
        ImageId::Rt,
        ImageId::Share,
        ImageId::View,
        ImageId::X,
        ImageId::Y,
    ];

    pub fn file_stem(self) -> &'static str {
        match self {
            ImageId::A => "A",
            ImageId::ArrowsHorizontal => "arrows_horizontal",
            ImageId::ArrowsVertical => "arrows_vertical",
            ImageId::B => "B",
            ImageId::Base => "base",
            ImageId::Dpad => "Dpad",
            ImageId::Lb => "LB",
            ImageId::LeftStick => "Left_Stick",
            ImageId::Lt => "LT",
            ImageId::Menu => "Menu",
            ImageId::Rb => "RB",
            ImageId::RightStick => "Right_Stick",
            ImageId::Rt => "RT",
            ImageId::Share => "Share",
            ImageId::View => "View",
            ImageId::X => "X",
            ImageId::Y => "Y",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.png", self.file_stem())
    }
}

/// Errors while loading a single image
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image decoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A decoded image waiting to be uploaded as a texture.
pub struct LoadedImage {
    pub id: ImageId,
    pub image: ColorImage,
}

/// Starts loading every image from `asset_dir` on the tokio runtime.
///
/// Must be called from within a runtime. Failed images are logged and never sent.
pub fn spawn_loader(asset_dir: PathBuf) -> mpsc::Receiver<LoadedImage> {
    let (tx, rx) = mpsc::channel(ImageId::ALL.len());
    info!("Loading controller images from {}", asset_dir.display());

    for id in ImageId::ALL {
        let tx = tx.clone();
        let path = asset_dir.join(id.file_name());
        tokio::spawn(async move {
            match load_image(id, &path).await {
                Ok(image) => {
                    if tx.send(image).await.is_err() {
                        debug!("UI closed before {:?} arrived", id);
                    }
                }
                Err(e) => warn!("Image {:?} unavailable: {}", id, e),
            }
        });
    }

    rx
}

/// Reads and decodes one image file.
pub async fn load_image(id: ImageId, path: &Path) -> Result<LoadedImage, AssetError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let image = tokio::task::spawn_blocking(move || decode_png(&bytes))
        .await?
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(LoadedImage { id, image })
}

fn decode_png(bytes: &[u8]) -> Result<ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Uploaded textures, keyed by image.
#[derive(Default)]
pub struct AssetStore {
    textures: HashMap<ImageId, TextureHandle>,
}

impl AssetStore {
    /// Uploads every image that has arrived since the last call.
    pub fn poll(&mut self, ctx: &egui::Context, rx: &mut mpsc::Receiver<LoadedImage>) {
        while let Ok(loaded) = rx.try_recv() {
            self.insert(ctx, loaded);
        }
    }

    pub fn insert(&mut self, ctx: &egui::Context, loaded: LoadedImage) {
        let texture = ctx.load_texture(
            format!("controller://{}", loaded.id.file_stem()),
            loaded.image,
            TextureOptions::LINEAR,
        );
        self.textures.insert(loaded.id, texture);

        if self.is_ready() {
            info!("All {} controller images loaded", ImageId::ALL.len());
        }
    }

    pub fn texture(&self, id: ImageId) -> Option<&TextureHandle> {
        self.textures.get(&id)
    }

    /// Pixel size of an image, `None` while it is not loaded.
    pub fn size(&self, id: ImageId) -> Option<Vec2> {
        self.texture(id).map(TextureHandle::size_vec2)
    }

    pub fn loaded_count(&self) -> usize {
        self.textures.len()
    }

    pub fn is_ready(&self) -> bool {
        ImageId::ALL.iter().all(|id| self.textures.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("padlabel-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<String> = ImageId::ALL.iter().map(|id| id.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ImageId::ALL.len());
        assert_eq!(ImageId::LeftStick.file_name(), "Left_Stick.png");
    }

    #[tokio::test]
    async fn test_load_image_decodes_png() {
        let dir = temp_dir("decode");
        let path = dir.join(ImageId::A.file_name());
        image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(ImageId::A, &path).await.unwrap();
        assert_eq!(loaded.id, ImageId::A);
        assert_eq!(loaded.image.size, [4, 2]);
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_files_are_errors() {
        let dir = temp_dir("errors");
        let missing = load_image(ImageId::B, &dir.join("nope.png")).await;
        assert!(matches!(missing, Err(AssetError::Read { .. })));

        let corrupt = dir.join("corrupt.png");
        std::fs::write(&corrupt, b"definitely not a png").unwrap();
        let result = load_image(ImageId::B, &corrupt).await;
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_store_becomes_ready_after_all_images() {
        let dir = temp_dir("store");
        for id in ImageId::ALL {
            image::RgbaImage::from_pixel(8, 6, image::Rgba([0, 0, 0, 255]))
                .save(dir.join(id.file_name()))
                .unwrap();
        }

        let ctx = egui::Context::default();
        let mut store = AssetStore::default();
        let mut rx = spawn_loader(dir);

        while let Some(loaded) = rx.recv().await {
            assert!(!store.is_ready());
            store.insert(&ctx, loaded);
        }

        assert!(store.is_ready());
        assert_eq!(store.loaded_count(), ImageId::ALL.len());
        assert_eq!(store.size(ImageId::Base), Some(Vec2::new(8.0, 6.0)));
    }
}
