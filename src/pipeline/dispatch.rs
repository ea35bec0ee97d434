//! Dedup stage between the fetcher and delivery
//!
//! Consumes the raw clip queue, records every clip it has not seen before and
//! forwards exactly those to the delivery queue. The store's write-once
//! insert is the authoritative gate, so a clip emitted twice in the same
//! cycle still reaches delivery only once.

use crate::error::{Error, Result};
use crate::store::ClipStore;
use crate::types::Clip;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Forwards genuinely-new clips from the raw queue to the delivery queue
pub struct Dispatcher {
    store: ClipStore,
}

impl Dispatcher {
    /// Create a new dispatcher over the given store
    pub fn new(store: ClipStore) -> Self {
        Self { store }
    }

    /// Consume the raw queue until it closes.
    ///
    /// Store failures are logged per clip and never stop the stage; a clip
    /// that could not be recorded is simply not forwarded.
    pub async fn run(
        self,
        mut raw_queue: UnboundedReceiver<Clip>,
        delivery_queue: UnboundedSender<Clip>,
    ) -> Result<()> {
        while let Some(clip) = raw_queue.recv().await {
            if let Err(e) = self.process(clip, &delivery_queue).await {
                tracing::error!("Failed to dispatch clip: {e}");
            }
        }
        Ok(())
    }

    /// Record one clip and forward it when it was not seen before
    async fn process(&self, clip: Clip, delivery_queue: &UnboundedSender<Clip>) -> Result<()> {
        if self.store.exists(&clip.slug).await? {
            return Ok(());
        }

        if self.store.insert(&clip).await? {
            tracing::info!("New clip {} queued for delivery", clip.slug);
            delivery_queue
                .send(clip)
                .map_err(|_| Error::internal("delivery queue closed"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn sample_clip(slug: &str) -> Clip {
        Clip {
            slug: slug.to_string(),
            title: format!("title {slug}"),
            url: format!("https://clips.twitch.tv/{slug}"),
            created_at: "2024-05-01T12:00:00Z".to_string(),
            duration_seconds: 30,
            curator_name: Some("curator".to_string()),
            curator_url: Some("https://www.twitch.tv/curator".to_string()),
            thumbnail_url: format!("https://cdn.test/{slug}-preview-480x272.jpg"),
            video_url: format!("https://cdn.test/{slug}.mp4"),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Clip>) -> Vec<String> {
        let mut slugs = Vec::new();
        while let Ok(clip) = rx.try_recv() {
            slugs.push(clip.slug);
        }
        slugs
    }

    #[tokio::test]
    async fn test_forwards_new_clips_in_order() {
        let store = ClipStore::open_in_memory().unwrap();
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let (delivery_tx, mut delivery_rx) = mpsc::unbounded_channel();

        raw_tx.send(sample_clip("first")).unwrap();
        raw_tx.send(sample_clip("second")).unwrap();
        drop(raw_tx);

        Dispatcher::new(store.clone())
            .run(raw_rx, delivery_tx)
            .await
            .unwrap();

        assert_eq!(drain(&mut delivery_rx), vec!["first", "second"]);
        assert!(store.exists("first").await.unwrap());
        assert!(store.exists("second").await.unwrap());
    }

    #[tokio::test]
    async fn test_drops_already_known_clips() {
        let store = ClipStore::open_in_memory().unwrap();
        store.insert(&sample_clip("known")).await.unwrap();

        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let (delivery_tx, mut delivery_rx) = mpsc::unbounded_channel();

        raw_tx.send(sample_clip("known")).unwrap();
        raw_tx.send(sample_clip("fresh")).unwrap();
        drop(raw_tx);

        Dispatcher::new(store).run(raw_rx, delivery_tx).await.unwrap();

        assert_eq!(drain(&mut delivery_rx), vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_duplicate_in_same_batch_forwarded_once() {
        let store = ClipStore::open_in_memory().unwrap();
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let (delivery_tx, mut delivery_rx) = mpsc::unbounded_channel();

        // The fetcher may emit the same clip twice within one cycle.
        raw_tx.send(sample_clip("dup")).unwrap();
        raw_tx.send(sample_clip("dup")).unwrap();
        drop(raw_tx);

        Dispatcher::new(store).run(raw_rx, delivery_tx).await.unwrap();

        assert_eq!(drain(&mut delivery_rx), vec!["dup"]);
    }

    #[tokio::test]
    async fn test_run_ends_when_raw_queue_closes() {
        let store = ClipStore::open_in_memory().unwrap();
        let (raw_tx, raw_rx) = mpsc::unbounded_channel::<Clip>();
        let (delivery_tx, _delivery_rx) = mpsc::unbounded_channel();
        drop(raw_tx);

        Dispatcher::new(store).run(raw_rx, delivery_tx).await.unwrap();
    }
}
