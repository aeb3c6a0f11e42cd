// src/app/prefetch.rs — background poster download pool
//
// A small fixed pool of worker threads pulls WorkItems off a shared channel,
// downloads and resizes each poster into the disk cache and reports back with
// the stored path. Texture upload happens lazily during paint, bounded per
// frame so a large grid never stalls the UI thread.
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use eframe::egui as eg;
use tracing::warn;

use crate::app::cache;

pub(crate) const POSTER_WORKERS: usize = 4;
pub(crate) const RESIZE_MAX_W: u32 = 360;
pub(crate) const RESIZE_QUALITY: u8 = 80;
pub(crate) const MAX_DONE_PER_FRAME: usize = 64;
pub(crate) const MAX_UPLOADS_PER_FRAME: usize = 3;

/// (cache key, source url)
pub(crate) type WorkItem = (String, String);

pub(crate) struct PrefetchDone {
    pub key: String,
    pub result: Result<PathBuf, String>,
}

impl crate::app::HubApp {
    /// Spawn the worker pool on first use. Workers exit when the app drops
    /// its work sender.
    fn ensure_poster_workers(&mut self) {
        if self.work_tx.is_some() {
            return;
        }

        let (work_tx, work_rx) = mpsc::channel::<WorkItem>();
        let (done_tx, done_rx) = mpsc::channel::<PrefetchDone>();
        self.work_tx = Some(work_tx);
        self.done_rx = Some(done_rx);

        let work_rx = Arc::new(Mutex::new(work_rx));
        let client = match reqwest::blocking::Client::builder()
            .user_agent("moviehub-desktop/posters")
            .timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(POSTER_WORKERS)
            .build()
        {
            Ok(c) => Arc::new(c),
            Err(e) => {
                warn!("poster http client build failed: {e}");
                self.work_tx = None;
                self.done_rx = None;
                return;
            }
        };

        for _ in 0..POSTER_WORKERS {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);
            std::thread::spawn(move || loop {
                let job = {
                    let Ok(rx) = work_rx.lock() else { break };
                    rx.recv()
                };
                let Ok((key, url)) = job else { break };
                let result = cache::download_and_store_resized_with_client(
                    &client,
                    &url,
                    &key,
                    RESIZE_MAX_W,
                    RESIZE_QUALITY,
                );
                let _ = done_tx.send(PrefetchDone { key, result });
            });
        }
    }

    /// Queue one image url for caching. Disk hits resolve immediately; urls
    /// that already failed this run are not retried.
    pub(crate) fn queue_poster(&mut self, url: &str) {
        if url.trim().is_empty() {
            return;
        }
        let key = cache::url_to_cache_key(url);
        if self.poster_paths.contains_key(&key)
            || self.poster_failed.contains(&key)
            || !self.queued_posters.insert(key.clone())
        {
            return;
        }
        if let Some(path) = cache::find_any_by_key(&key) {
            self.poster_paths.insert(key, path);
            return;
        }
        self.ensure_poster_workers();
        if let Some(tx) = &self.work_tx {
            let _ = tx.send((key, url.to_string()));
        }
    }

    pub(crate) fn queue_catalog_posters(&mut self, ctx: &eg::Context) {
        let urls: Vec<String> = self
            .store
            .movies
            .iter()
            .filter_map(|m| m.image.clone())
            .chain(self.store.actors.iter().filter_map(|a| a.image.clone()))
            .collect();
        for url in urls {
            self.queue_poster(&url);
        }
        ctx.request_repaint();
    }

    pub(crate) fn queue_home_posters(&mut self, ctx: &eg::Context) {
        let Some(home) = &self.home else { return };
        let mut urls: Vec<String> = Vec::new();
        if let Some(featured) = &home.featured {
            urls.extend(featured.image.clone());
        }
        for movie in home
            .recent
            .iter()
            .chain(home.favorites.iter())
            .chain(home.genre_rows.iter().flat_map(|(_, row)| row.iter()))
        {
            urls.extend(movie.image.clone());
        }
        for url in urls {
            self.queue_poster(&url);
        }
        ctx.request_repaint();
    }

    /// Drain completed downloads, bounded per frame.
    pub(crate) fn poll_prefetch_done(&mut self, ctx: &eg::Context) {
        let mut drained = 0usize;
        while drained < MAX_DONE_PER_FRAME {
            let Some(rx) = &self.done_rx else { break };
            match rx.try_recv() {
                Ok(PrefetchDone { key, result }) => {
                    drained += 1;
                    match result {
                        Ok(path) => {
                            self.poster_paths.insert(key, path);
                        }
                        Err(e) => {
                            warn!("poster download failed: {e}");
                            self.poster_failed.insert(key);
                        }
                    }
                }
                Err(mpsc::TryRecvError::Empty) | Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }
        if drained > 0 {
            let total = self.queued_posters.len();
            let done = (self.poster_paths.len() + self.poster_failed.len()).min(total);
            if done < total {
                self.set_status(format!("Caching posters ({done}/{total})…"));
            } else if self.poster_failed.is_empty() {
                self.set_status(format!("Posters cached ({total})."));
            } else {
                self.set_status(format!(
                    "Posters cached ({total}, {} failed).",
                    self.poster_failed.len()
                ));
            }
            ctx.request_repaint();
        }
    }

    /// Texture for an image url, uploading from the disk cache when needed.
    /// Uploads are budgeted per frame; a miss queues the download and returns
    /// None so the card paints its placeholder this frame.
    pub(crate) fn poster_texture(
        &mut self,
        ctx: &eg::Context,
        url: &str,
    ) -> Option<eg::TextureHandle> {
        if url.trim().is_empty() {
            return None;
        }
        let key = cache::url_to_cache_key(url);
        if let Some(tex) = self.textures.get(&key) {
            return Some(tex.clone());
        }
        if self.poster_failed.contains(&key) {
            return None;
        }

        let Some(path) = self.poster_paths.get(&key).cloned() else {
            self.queue_poster(url);
            return None;
        };
        if self.uploads_this_frame >= MAX_UPLOADS_PER_FRAME {
            ctx.request_repaint();
            return None;
        }
        self.uploads_this_frame += 1;

        match cache::load_rgba_image(&path) {
            Ok((w, h, rgba)) => {
                let image =
                    eg::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba);
                let tex = ctx.load_texture(format!("poster:{key}"), image, Default::default());
                match self.textures.entry(key) {
                    Entry::Occupied(e) => Some(e.get().clone()),
                    Entry::Vacant(e) => Some(e.insert(tex).clone()),
                }
            }
            Err(e) => {
                warn!("poster decode failed for {}: {e}", path.display());
                self.poster_failed.insert(key);
                None
            }
        }
    }
}
