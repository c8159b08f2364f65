//! Export of a collection as a messaging-app sticker pack.
//!
//! A failed export removes the files it wrote, so `dest` never holds images
//! without a manifest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use stickerbox_core::Result;
use stickerbox_core::error::InvalidInputError;
use stickerbox_core::traits::BlobStore;
use stickerbox_core::types::{Collection, CollectionId};

use crate::library::FileLibrary;
use crate::store::{map_io, map_json};

/// Fewest stickers a pack may hold.
pub const PACK_MIN_STICKERS: usize = 3;

/// Most stickers a pack may hold.
pub const PACK_MAX_STICKERS: usize = 30;

const MANIFEST_FILE: &str = "contents.json";

/// One sticker entry in a pack manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSticker {
    /// Image file name inside the pack directory.
    pub file: String,
    pub name: String,
    pub emote_id: String,
}

/// The manifest written to `contents.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPack {
    pub identifier: String,
    pub name: String,
    pub animated: bool,
    pub stickers: Vec<PackSticker>,
    #[serde(skip)]
    pub dir: PathBuf,
}

#[instrument(skip(library, dest), fields(dest = %dest.display()))]
pub(crate) async fn export_collection(
    library: &FileLibrary,
    id: &CollectionId,
    dest: &Path,
) -> Result<ExportedPack> {
    let collection = library.collections().require(id)?;
    let count = collection.stickers.len();

    if !(PACK_MIN_STICKERS..=PACK_MAX_STICKERS).contains(&count) {
        return Err(InvalidInputError::Export {
            reason: format!(
                "a pack needs {} to {} stickers, '{}' has {}",
                PACK_MIN_STICKERS, PACK_MAX_STICKERS, collection.name, count
            ),
        }
        .into());
    }

    let created = !dest.exists();
    fs::create_dir_all(dest).map_err(|e| map_io(dest, e))?;

    let mut written = Vec::new();
    match write_pack(library, collection, dest, &mut written).await {
        Ok(pack) => {
            info!(stickers = pack.stickers.len(), "Exported sticker pack");
            Ok(pack)
        }
        Err(err) => {
            warn!(error = %err, files = written.len(), "Export failed, removing partial pack");
            discard(dest, created, &written);
            Err(err)
        }
    }
}

/// Write the images and manifest, recording every path touched in `written`.
async fn write_pack(
    library: &FileLibrary,
    collection: Collection,
    dest: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<ExportedPack> {
    let mut stickers = Vec::with_capacity(collection.stickers.len());
    for (index, sticker_id) in collection.stickers.iter().enumerate() {
        let sticker = library.require_sticker(sticker_id).await?;
        let bytes = library.blobs().read(&sticker.blob_path()).await?;

        let file = format!("{:02}.webp", index + 1);
        let target = dest.join(&file);
        written.push(target.clone());
        fs::write(&target, &bytes).map_err(|e| map_io(&target, e))?;

        stickers.push(PackSticker {
            file,
            name: sticker.name,
            emote_id: sticker.emote.id.to_string(),
        });
    }

    let pack = ExportedPack {
        identifier: collection.id.to_string(),
        name: collection.name,
        animated: collection.kind.is_animated(),
        stickers,
        dir: dest.to_path_buf(),
    };

    let manifest = dest.join(MANIFEST_FILE);
    let content = serde_json::to_vec_pretty(&pack).map_err(map_json)?;
    written.push(manifest.clone());
    fs::write(&manifest, content).map_err(|e| map_io(&manifest, e))?;

    Ok(pack)
}

fn discard(dest: &Path, created: bool, written: &[PathBuf]) {
    for path in written {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove exported file"),
        }
    }

    if !created {
        return;
    }
    if let Err(e) = fs::remove_dir(dest) {
        warn!(dest = %dest.display(), error = %e, "Failed to remove export directory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stickerbox_core::traits::{BlobStore, StickerStore};
    use stickerbox_core::types::{
        EmoteId, EmoteRef, ImageMeta, Sticker, StickerId, StickerKind,
    };
    use tempfile::TempDir;

    async fn library_with_stickers(count: usize) -> (TempDir, FileLibrary, CollectionId) {
        let tmp = TempDir::new().unwrap();
        let library = FileLibrary::open(tmp.path().join("library"));
        let collection = library
            .collections()
            .create("party", StickerKind::Animated)
            .unwrap();

        for i in 0..count {
            let sticker = Sticker {
                id: StickerId::new(format!("s{}", i)).unwrap(),
                name: format!("party {}", i),
                animated: true,
                image: ImageMeta {
                    width: 512,
                    height: 512,
                    size_bytes: 1,
                },
                emote: EmoteRef {
                    id: EmoteId::new(format!("e{}", i)).unwrap(),
                    name: format!("e{}", i),
                    owner: None,
                },
                created_at: Utc::now(),
            };
            library.stickers().insert(&sticker).await.unwrap();
            library
                .blobs()
                .write(&sticker.blob_path(), &[i as u8])
                .await
                .unwrap();
            library
                .add_to_collection(&collection.id, &sticker.id)
                .await
                .unwrap();
        }

        (tmp, library, collection.id)
    }

    #[tokio::test]
    async fn test_export_writes_manifest_and_images() {
        let (tmp, library, id) = library_with_stickers(3).await;
        let dest = tmp.path().join("pack");

        let pack = library.export_collection(&id, &dest).await.unwrap();

        assert_eq!(pack.name, "party");
        assert!(pack.animated);
        assert_eq!(pack.stickers.len(), 3);
        assert_eq!(pack.stickers[0].file, "01.webp");
        assert_eq!(pack.stickers[2].emote_id, "e2");
        assert_eq!(std::fs::read(dest.join("02.webp")).unwrap(), vec![1u8]);

        let manifest: ExportedPack =
            serde_json::from_slice(&std::fs::read(dest.join("contents.json")).unwrap()).unwrap();
        assert_eq!(manifest.identifier, id.to_string());
        assert_eq!(manifest.stickers, pack.stickers);
    }

    #[tokio::test]
    async fn test_export_rejects_small_pack() {
        let (tmp, library, id) = library_with_stickers(2).await;

        let err = library
            .export_collection(&id, tmp.path().join("pack"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("needs 3 to 30 stickers"));
        assert!(!tmp.path().join("pack").exists());
    }

    async fn drop_blob(library: &FileLibrary, sticker: &str) {
        let sticker = library
            .require_sticker(&StickerId::new(sticker).unwrap())
            .await
            .unwrap();
        library.blobs().delete(&sticker.blob_path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_export_removes_new_directory() {
        let (tmp, library, id) = library_with_stickers(3).await;
        drop_blob(&library, "s2").await;
        let dest = tmp.path().join("pack");

        assert!(library.export_collection(&id, &dest).await.is_err());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_failed_export_keeps_existing_files() {
        let (tmp, library, id) = library_with_stickers(3).await;
        drop_blob(&library, "s2").await;
        let dest = tmp.path().join("pack");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("notes.txt"), b"keep").unwrap();

        assert!(library.export_collection(&id, &dest).await.is_err());

        assert_eq!(std::fs::read(dest.join("notes.txt")).unwrap(), b"keep");
        assert!(!dest.join("01.webp").exists());
        assert!(!dest.join("02.webp").exists());
        assert!(!dest.join("contents.json").exists());
    }

    #[tokio::test]
    async fn test_export_missing_collection() {
        let tmp = TempDir::new().unwrap();
        let library = FileLibrary::open(tmp.path());

        let err = library
            .export_collection(&CollectionId::new("nope").unwrap(), tmp.path().join("pack"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
