use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

mod stats;
mod storage;

pub use stats::{UsageStats, UNKNOWN_BRAND};
pub use storage::JsonlStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub bot_response: String,
    pub brand: Option<String>,
    /// Comma-joined issue categories, empty when none were detected.
    pub issue_type: String,
    #[serde(default)]
    pub solved: bool,
}

/// The five values a sink is handed for each exchange.
#[derive(Debug, Clone)]
pub struct NewConversation {
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub bot_response: String,
    pub brand: Option<String>,
    pub issue_type: String,
}

impl NewConversation {
    fn into_record(self, id: u64) -> ConversationRecord {
        ConversationRecord {
            id,
            timestamp: self.timestamp,
            user_message: self.user_message,
            bot_response: self.bot_response,
            brand: self.brand,
            issue_type: self.issue_type,
            solved: false,
        }
    }
}

#[async_trait]
pub trait ConversationSink: Send + Sync {
    /// Stores one exchange and returns the id it was given.
    async fn record(&self, conversation: NewConversation) -> Result<u64>;

    /// Everything stored so far, oldest first.
    async fn load_all(&self) -> Result<Vec<ConversationRecord>>;

    async fn mark_solved(&self, id: u64) -> Result<()>;

    /// Newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<ConversationRecord>> {
        let mut records = self.load_all().await?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        records.truncate(limit);
        Ok(records)
    }
}

/// Keeps conversations for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<ConversationRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationSink for MemoryStore {
    async fn record(&self, conversation: NewConversation) -> Result<u64> {
        let mut records = self.records.lock().await;
        let id = records.last().map(|r| r.id + 1).unwrap_or(1);
        records.push(conversation.into_record(id));
        Ok(id)
    }

    async fn load_all(&self) -> Result<Vec<ConversationRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn mark_solved(&self, id: u64) -> Result<()> {
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("No conversation with id {}", id))?;
        record.solved = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    pub(crate) fn conversation(message: &str, brand: Option<&str>, issues: &str) -> NewConversation {
        NewConversation {
            timestamp: Utc::now(),
            user_message: message.to_string(),
            bot_response: format!("réponse à {}", message),
            brand: brand.map(String::from),
            issue_type: issues.to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_ids_and_solving() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.record(conversation("a", Some("otis"), "")).await?, 1);
        assert_eq!(store.record(conversation("b", None, "porte")).await?, 2);

        store.mark_solved(2).await?;
        let records = store.load_all().await?;
        assert!(!records[0].solved);
        assert!(records[1].solved);
        assert!(store.mark_solved(42).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() -> Result<()> {
        let store = MemoryStore::new();
        let now = Utc::now();
        for (i, message) in ["vieux", "moyen", "récent"].iter().enumerate() {
            let mut c = conversation(message, None, "");
            c.timestamp = now + Duration::seconds(i as i64);
            store.record(c).await?;
        }

        let recent = store.recent(2).await?;
        let messages: Vec<&str> = recent.iter().map(|r| r.user_message.as_str()).collect();
        assert_eq!(messages, vec!["récent", "moyen"]);
        Ok(())
    }
}
