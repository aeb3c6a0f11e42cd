// src/app/cache.rs — on-disk poster cache
//
// Posters are downloaded once, resized to card width and stored as JPEG under
// the cache dir. Entries older than the retention window are pruned the first
// time the poster dir is touched in a run.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Once, OnceLock};
use std::time::{Duration, SystemTime};

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use tracing::warn;

use crate::config::{load_config, LOCAL_CACHE_DIR};

static CACHE_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static POSTER_DIR_ONCE: OnceLock<PathBuf> = OnceLock::new();
static POSTER_PRUNE_ONCE: Once = Once::new();

const POSTER_RETENTION_DAYS: u64 = 14;
const POSTER_RETENTION_SECS: u64 = POSTER_RETENTION_DAYS * 24 * 60 * 60;

pub fn cache_dir() -> PathBuf {
    CACHE_DIR_ONCE
        .get_or_init(|| {
            let cfg = load_config();
            let mut path = PathBuf::from(cfg.cache_dir.unwrap_or_else(|| LOCAL_CACHE_DIR.to_string()));
            if let Err(e) = fs::create_dir_all(&path) {
                warn!("failed to create cache dir {}: {e}", path.display());
                path = PathBuf::from(LOCAL_CACHE_DIR);
                let _ = fs::create_dir_all(&path);
            }
            path
        })
        .clone()
}

pub fn poster_cache_dir() -> PathBuf {
    let dir = POSTER_DIR_ONCE.get_or_init(|| {
        let mut path = cache_dir().join("posters");
        if let Err(e) = fs::create_dir_all(&path) {
            warn!("failed to create poster cache dir {}: {e}", path.display());
            path = cache_dir();
        }
        path
    });

    POSTER_PRUNE_ONCE.call_once({
        let path = dir.clone();
        move || {
            if let Err(err) = prune_poster_cache_in_dir(&path) {
                warn!("poster cache prune failed: {err}");
            }
        }
    });

    dir.clone()
}

fn prune_poster_cache_if_needed() -> std::io::Result<usize> {
    let dir = poster_cache_dir();
    prune_poster_cache_in_dir(&dir)
}

fn prune_poster_cache_in_dir(dir: &Path) -> std::io::Result<usize> {
    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(POSTER_RETENTION_SECS))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let mut removed = 0usize;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        // Stale partial downloads are removed regardless of age.
        if ext == "part" {
            let _ = fs::remove_file(&path);
            removed += 1;
            continue;
        }
        if !matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "webp") {
            continue;
        }
        let metadata = entry.metadata()?;
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        if modified < cutoff || metadata.len() == 0 {
            let _ = fs::remove_file(&path);
            removed += 1;
        }
    }
    Ok(removed)
}

pub fn url_to_cache_key(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

/// Return (width, height, RGBA8 bytes) for a cached poster file.
pub fn load_rgba_image(path: &Path) -> Result<(u32, u32, Vec<u8>), String> {
    if !path.exists() {
        return Err("not found".into());
    }
    let img = image::ImageReader::open(path)
        .map_err(|e| format!("open image {}: {e}", path.display()))?
        .with_guessed_format()
        .map_err(|e| format!("guess format {}: {e}", path.display()))?
        .decode()
        .map_err(|e| format!("decode {}: {e}", path.display()))?;
    let (w, h) = img.dimensions();
    Ok((w, h, img.to_rgba8().to_vec()))
}

pub fn find_any_by_key(key: &str) -> Option<PathBuf> {
    let poster_dir = poster_cache_dir();
    let candidates = [
        format!("{key}.jpg"),
        format!("{key}.png"),
        format!("{key}.jpeg"),
        format!("{key}.webp"),
    ];
    for c in candidates {
        let p = poster_dir.join(c);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

/// Download a poster, resize to `max_width` (keeping aspect) and store it as
/// JPEG, reusing the caller's reqwest client for connection pooling. Returns
/// the on-disk path; download or decode failures propagate so the caller can
/// mark the url as failed and stop retrying it.
pub fn download_and_store_resized_with_client(
    client: &reqwest::blocking::Client,
    url: &str,
    key: &str,
    max_width: u32,
    quality: u8,
) -> Result<PathBuf, String> {
    let dest = poster_cache_dir().join(format!("{key}.jpg"));
    if dest.exists() {
        return Ok(dest);
    }

    let bytes = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.bytes())
        .map_err(|e| format!("download bytes: {e}"))?;

    let img = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => return Err(format!("decode {url}: {e}")),
    };

    let (w, h) = img.dimensions();
    let out: DynamicImage = if w > max_width {
        let new_h = ((h as f32) * (max_width as f32 / w as f32))
            .round()
            .max(1.0) as u32;
        img.resize_exact(max_width, new_h, FilterType::CatmullRom)
    } else {
        img
    };

    let mut jpeg_bytes: Vec<u8> = Vec::new();
    {
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_bytes, quality);
        encoder
            .encode_image(&out)
            .map_err(|e| format!("jpeg encode: {e}"))?;
    }

    if let Some(parent) = dest.parent() {
        let _ = fs::create_dir_all(parent);
    }
    // Write to a .part file first so a crash never leaves a truncated jpg.
    let tmp = dest.with_extension("jpg.part");
    {
        let mut f = fs::File::create(&tmp).map_err(|e| format!("create tmp: {e}"))?;
        f.write_all(&jpeg_bytes)
            .map_err(|e| format!("write: {e}"))?;
    }
    fs::rename(&tmp, &dest).map_err(|e| format!("rename: {e}"))?;

    let _ = prune_poster_cache_if_needed();
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_are_stable_hex_digests() {
        assert_eq!(url_to_cache_key("hello"), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            url_to_cache_key("http://a/poster.jpg"),
            url_to_cache_key("http://a/poster.jpg")
        );
        assert_ne!(
            url_to_cache_key("http://a/poster.jpg"),
            url_to_cache_key("http://a/poster2.jpg")
        );
    }

    #[test]
    fn prune_keeps_fresh_posters_and_drops_partials() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("abc.jpg");
        fs::write(&fresh, b"jpegdata").unwrap();
        let partial = dir.path().join("def.jpg.part");
        fs::write(&partial, b"half").unwrap();
        let unrelated = dir.path().join("notes.txt");
        fs::write(&unrelated, b"keep").unwrap();
        let empty = dir.path().join("ghi.png");
        fs::write(&empty, b"").unwrap();

        let removed = prune_poster_cache_in_dir(dir.path()).unwrap();
        assert_eq!(removed, 2);
        assert!(fresh.exists());
        assert!(!partial.exists());
        assert!(unrelated.exists());
        assert!(!empty.exists());
    }

    #[test]
    fn decodes_cached_poster_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.png");
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let (w, h, rgba) = load_rgba_image(&path).unwrap();
        assert_eq!((w, h), (4, 2));
        assert_eq!(rgba.len(), 4 * 2 * 4);
        assert_eq!(&rgba[0..4], &[10, 20, 30, 255]);
    }
}
