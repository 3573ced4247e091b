//! Subscriber store persisted as a JSON array of chat identifiers.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tokio::sync::Mutex;
use tracing::{error, info};

use super::atomic_write::replace_file;
use crate::domain::SubscriberId;
use crate::domain::ports::{SubscriberStore, SubscriberStoreError};

/// File-backed [`SubscriberStore`].
///
/// Every read loads the whole file and every add rewrites it. Adds within one
/// process are serialised; separate processes sharing the file can still lose
/// each other's additions.
pub struct JsonFileSubscriberStore {
    dir: Arc<Dir>,
    file_name: String,
    display_path: String,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for JsonFileSubscriberStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileSubscriberStore")
            .field("path", &self.display_path)
            .finish_non_exhaustive()
    }
}

impl JsonFileSubscriberStore {
    /// Open the store at `path`, creating the file with `[]` when absent.
    ///
    /// # Errors
    /// Returns an I/O error when the parent directory cannot be opened, the
    /// path has no file name, or the initial file cannot be written.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("subscriber file path has no usable file name: {}", path.display()),
                )
            })?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;

        if !dir.exists(&file_name) {
            replace_file(&dir, &file_name, "[]")?;
            info!(path = %path.display(), "initialised empty subscriber file");
        }

        Ok(Self {
            dir: Arc::new(dir),
            file_name,
            display_path: path.display().to_string(),
            write_lock: Mutex::new(()),
        })
    }

    async fn read_ids(&self) -> Result<BTreeSet<SubscriberId>, String> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let contents = tokio::task::spawn_blocking(move || dir.read_to_string(&file_name))
            .await
            .map_err(|err| format!("read task failed: {err}"))?;

        parse_ids(&contents.map_err(|err| err.to_string())?)
    }

    async fn write_ids(&self, ids: &BTreeSet<SubscriberId>) -> Result<(), SubscriberStoreError> {
        let mut encoded = serde_json::to_string_pretty(ids)
            .map_err(|err| SubscriberStoreError::encode(err.to_string()))?;
        encoded.push('\n');

        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || replace_file(&dir, &file_name, &encoded))
            .await
            .map_err(|err| SubscriberStoreError::io(format!("write task failed: {err}")))?
            .map_err(|err| SubscriberStoreError::io(err.to_string()))
    }
}

fn parse_ids(contents: &str) -> Result<BTreeSet<SubscriberId>, String> {
    let ids: Vec<SubscriberId> = serde_json::from_str(contents).map_err(|err| err.to_string())?;
    Ok(ids.into_iter().collect())
}

#[async_trait]
impl SubscriberStore for JsonFileSubscriberStore {
    async fn load(&self) -> BTreeSet<SubscriberId> {
        match self.read_ids().await {
            Ok(ids) => ids,
            Err(message) => {
                error!(path = %self.display_path, error = %message, "failed to read subscriber file");
                BTreeSet::new()
            }
        }
    }

    async fn add(&self, id: SubscriberId) -> Result<bool, SubscriberStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut ids = self.load().await;
        if !ids.insert(id) {
            return Ok(false);
        }
        self.write_ids(&ids).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workdir() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).expect("read subscriber file")
    }

    #[rstest]
    fn open_initialises_missing_file(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        JsonFileSubscriberStore::open(&path).expect("open store");
        assert_eq!(read(&path), "[]");
    }

    #[rstest]
    fn open_leaves_existing_file_untouched(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        std::fs::write(&path, "[7, 3]").expect("seed file");
        JsonFileSubscriberStore::open(&path).expect("open store");
        assert_eq!(read(&path), "[7, 3]");
    }

    #[rstest]
    #[tokio::test]
    async fn load_deduplicates_persisted_ids(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        std::fs::write(&path, "[5, 1, 5, -100]").expect("seed file");
        let store = JsonFileSubscriberStore::open(&path).expect("open store");

        let ids = store.load().await;
        assert_eq!(
            ids,
            BTreeSet::from([SubscriberId::new(-100), SubscriberId::new(1), SubscriberId::new(5)])
        );
    }

    #[rstest]
    #[case::not_json("{not json")]
    #[case::object("{\"ids\": [1]}")]
    #[case::strings("[\"1\"]")]
    #[tokio::test]
    async fn malformed_contents_load_as_empty(workdir: TempDir, #[case] contents: &str) {
        let path = workdir.path().join("chat_ids.json");
        std::fs::write(&path, contents).expect("seed file");
        let store = JsonFileSubscriberStore::open(&path).expect("open store");

        assert!(store.load().await.is_empty());
    }

    /// Collects formatted log lines for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn file_removed_after_open_loads_as_empty_and_logs_error(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        let store = JsonFileSubscriberStore::open(&path).expect("open store");
        std::fs::remove_file(&path).expect("remove file");
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        assert!(store.load().await.is_empty());

        let text = logs.text();
        assert!(text.contains("ERROR"), "missing error log: {text}");
        assert!(text.contains("failed to read subscriber file"), "unexpected log: {text}");
    }

    #[rstest]
    #[tokio::test]
    async fn add_recreates_removed_file(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        let store = JsonFileSubscriberStore::open(&path).expect("open store");
        std::fs::remove_file(&path).expect("remove file");

        assert_eq!(store.add(SubscriberId::new(9)).await, Ok(true));
        let persisted: Vec<i64> = serde_json::from_str(&read(&path)).expect("valid JSON");
        assert_eq!(persisted, vec![9]);
    }

    #[rstest]
    #[tokio::test]
    async fn add_is_idempotent_and_persists_sorted_list(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        let store = JsonFileSubscriberStore::open(&path).expect("open store");

        assert_eq!(store.add(SubscriberId::new(42)).await, Ok(true));
        assert_eq!(store.add(SubscriberId::new(7)).await, Ok(true));
        assert_eq!(store.add(SubscriberId::new(42)).await, Ok(false));

        let persisted: Vec<i64> = serde_json::from_str(&read(&path)).expect("valid JSON");
        assert_eq!(persisted, vec![7, 42]);
        assert!(store.contains(SubscriberId::new(7)).await);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_adds_are_all_kept(workdir: TempDir) {
        let path = workdir.path().join("chat_ids.json");
        let store = Arc::new(JsonFileSubscriberStore::open(&path).expect("open store"));

        let tasks: Vec<_> = (1..=8_i64)
            .map(|id| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add(SubscriberId::new(id)).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.expect("join"), Ok(true));
        }

        assert_eq!(store.load().await.len(), 8);
    }
}
