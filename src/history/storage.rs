use super::{ConversationRecord, ConversationSink, NewConversation};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Conversations stored one JSON document per line.
#[derive(Debug)]
pub struct JsonlStore {
    storage_path: PathBuf,
    write_lock: Mutex<()>,
}

/// One line of the history file. Lines that no longer parse as a record are
/// kept verbatim so rewrites never drop them.
#[derive(Debug)]
enum StoredLine {
    Record(ConversationRecord),
    Unreadable { text: String, id: Option<u64> },
}

impl StoredLine {
    fn parse(line: &str, line_no: usize) -> Self {
        match serde_json::from_str::<ConversationRecord>(line) {
            Ok(record) => StoredLine::Record(record),
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping unreadable history entry");
                let id = serde_json::from_str::<serde_json::Value>(line)
                    .ok()
                    .and_then(|value| value.get("id").and_then(|id| id.as_u64()));
                StoredLine::Unreadable {
                    text: line.to_string(),
                    id,
                }
            }
        }
    }

    fn id(&self) -> Option<u64> {
        match self {
            StoredLine::Record(record) => Some(record.id),
            StoredLine::Unreadable { id, .. } => *id,
        }
    }
}

impl JsonlStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            storage_path: path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    async fn read_lines(&self) -> Result<Vec<StoredLine>> {
        let exists = fs::try_exists(&self.storage_path)
            .await
            .with_context(|| format!("Failed to access history at {:?}", self.storage_path))?;
        if !exists {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.storage_path)
            .await
            .with_context(|| format!("Failed to read history at {:?}", self.storage_path))?;

        Ok(content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| StoredLine::parse(line, i + 1))
            .collect())
    }

    async fn read_records(&self) -> Result<Vec<ConversationRecord>> {
        Ok(self
            .read_lines()
            .await?
            .into_iter()
            .filter_map(|line| match line {
                StoredLine::Record(record) => Some(record),
                StoredLine::Unreadable { .. } => None,
            })
            .collect())
    }

    async fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Replaces the history file through a sibling temp file and a rename.
    async fn replace_contents(&self, content: String) -> Result<()> {
        self.ensure_parent().await?;
        let mut tmp_name = self
            .storage_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = self.storage_path.with_file_name(tmp_name);

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, &self.storage_path)
            .await
            .with_context(|| format!("Failed to replace history at {:?}", self.storage_path))?;
        Ok(())
    }
}

#[async_trait]
impl ConversationSink for JsonlStore {
    async fn record(&self, conversation: NewConversation) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        // Ids still readable from damaged lines count too.
        let id = self
            .read_lines()
            .await?
            .iter()
            .filter_map(StoredLine::id)
            .max()
            .unwrap_or(0)
            + 1;
        let record = conversation.into_record(id);

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        self.ensure_parent().await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.storage_path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        info!(id, brand = record.brand.as_deref(), "conversation recorded");
        Ok(id)
    }

    async fn load_all(&self) -> Result<Vec<ConversationRecord>> {
        self.read_records().await
    }

    async fn mark_solved(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut lines = self.read_lines().await?;
        let record = lines
            .iter_mut()
            .find_map(|line| match line {
                StoredLine::Record(record) if record.id == id => Some(record),
                _ => None,
            })
            .ok_or_else(|| anyhow!("No conversation with id {}", id))?;
        record.solved = true;

        let mut content = String::new();
        for line in &lines {
            match line {
                StoredLine::Record(record) => content.push_str(&serde_json::to_string(record)?),
                StoredLine::Unreadable { text, .. } => content.push_str(text),
            }
            content.push('\n');
        }

        self.replace_contents(content).await?;
        info!(id, "conversation marked as solved");
        Ok(())
    }
}
