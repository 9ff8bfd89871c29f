pub mod analysis;
pub mod assistant;
pub mod config;
pub mod display;
pub mod history;
pub mod knowledge;
pub mod responder;
pub mod theme;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use analysis::{AnalysisResult, Analyzer};
pub use assistant::{Assistant, Exchange};
pub use config::Config;
pub use history::{ConversationRecord, ConversationSink, JsonlStore, MemoryStore, NewConversation};
pub use knowledge::{Brand, KnowledgeBase, KnowledgeBaseError};
pub use responder::Responder;
