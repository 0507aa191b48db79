//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use topicnav_topics::TOPICS_FILE;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The topic document was modified
    TopicsModified(PathBuf),

    /// An HTML fragment was modified
    PageModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification
    Modified(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::TopicsModified(p)
            | Self::PageModified(p)
            | Self::Created(p)
            | Self::Deleted(p)
            | Self::Modified(p) => p,
        }
    }
}

/// File watcher for detecting changes in the site directory.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive events. Events stop when
    /// the watcher is dropped.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::warn!("Not watching missing path {}", path.display());
            }
        }

        std::thread::spawn(move || {
            let debounce = Duration::from_millis(100);
            let mut last: Option<(Instant, WatchEvent)> = None;

            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    let Some(watch_event) = classify_event(path, &event.kind) else {
                        continue;
                    };

                    // Editors fire several events per save for the same file.
                    let now = Instant::now();
                    if let Some((at, prev)) = &last {
                        if *prev == watch_event && now.duration_since(*at) < debounce {
                            continue;
                        }
                    }
                    last = Some((now, watch_event.clone()));

                    if async_tx.blocking_send(watch_event).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a [`WatchEvent`].
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    let path_buf = path.to_path_buf();

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path_buf)),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path_buf)),
        EventKind::Modify(_) => {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

            if name == TOPICS_FILE {
                Some(WatchEvent::TopicsModified(path_buf))
            } else if ext == "html" || ext == "htm" {
                Some(WatchEvent::PageModified(path_buf))
            } else {
                Some(WatchEvent::Modified(path_buf))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_topics_and_pages() {
        let modify = notify::EventKind::Modify(ModifyKind::Any);

        assert_eq!(
            classify_event(Path::new("site/topics.json"), &modify),
            Some(WatchEvent::TopicsModified(PathBuf::from("site/topics.json")))
        );
        assert_eq!(
            classify_event(Path::new("site/a.html"), &modify),
            Some(WatchEvent::PageModified(PathBuf::from("site/a.html")))
        );
        assert_eq!(
            classify_event(Path::new("site/logo.svg"), &modify),
            Some(WatchEvent::Modified(PathBuf::from("site/logo.svg")))
        );
        assert_eq!(
            classify_event(
                Path::new("site/new.html"),
                &notify::EventKind::Create(CreateKind::File)
            ),
            Some(WatchEvent::Created(PathBuf::from("site/new.html")))
        );
        assert_eq!(
            classify_event(Path::new("site/a.html"), &notify::EventKind::Any),
            None
        );
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let page = temp.path().join("page.html");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&page, "<h1>Created</h1>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
