use crate::history::{ConversationRecord, ConversationSink, NewConversation};
use crate::knowledge::KnowledgeBase;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

mod pipeline;

// Test utilities and helpers
pub(crate) struct TestUtils;

impl TestUtils {
    pub fn knowledge_base() -> KnowledgeBase {
        KnowledgeBase::builtin().expect("built-in knowledge base must load")
    }
}

/// A sink whose storage is always down.
pub(crate) struct FailingSink;

#[async_trait]
impl ConversationSink for FailingSink {
    async fn record(&self, _conversation: NewConversation) -> Result<u64> {
        Err(anyhow!("disk full"))
    }

    async fn load_all(&self) -> Result<Vec<ConversationRecord>> {
        Ok(Vec::new())
    }

    async fn mark_solved(&self, id: u64) -> Result<()> {
        Err(anyhow!("No conversation with id {}", id))
    }
}
