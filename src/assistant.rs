use crate::analysis::{AnalysisResult, Analyzer};
use crate::history::{ConversationSink, NewConversation};
use crate::knowledge::KnowledgeBase;
use crate::responder::Responder;
use anyhow::Result;
use chrono::Utc;
use tracing::warn;

#[derive(Debug)]
pub struct Exchange {
    pub analysis: AnalysisResult,
    pub response: String,
    /// Id given by the sink, `None` if recording failed.
    pub conversation_id: Option<u64>,
}

/// Runs one message through analysis and composition, then hands the
/// exchange to the conversation sink.
pub struct Assistant<'a> {
    kb: &'a KnowledgeBase,
    analyzer: Analyzer<'a>,
    sink: &'a dyn ConversationSink,
}

impl<'a> Assistant<'a> {
    pub fn new(kb: &'a KnowledgeBase, sink: &'a dyn ConversationSink) -> Result<Self> {
        Ok(Self {
            kb,
            analyzer: Analyzer::new(kb)?,
            sink,
        })
    }

    pub async fn handle(&self, message: &str) -> Exchange {
        let analysis = self.analyzer.analyze(message);
        let response = Responder::compose(&analysis, self.kb);

        let conversation = NewConversation {
            timestamp: Utc::now(),
            user_message: message.to_string(),
            bot_response: response.clone(),
            brand: analysis.brand.clone(),
            issue_type: analysis.issue_type(),
        };

        // Recording is best effort; the answer is returned either way.
        let conversation_id = match self.sink.record(conversation).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "failed to record conversation");
                None
            }
        };

        Exchange {
            analysis,
            response,
            conversation_id,
        }
    }
}
