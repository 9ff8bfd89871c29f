use crate::knowledge::{Brand, KnowledgeBase};
use anyhow::Result;
use serde::Serialize;
use tracing::debug;

mod catalog;
mod codes;

pub use catalog::{issue_label, IssueCategory, ISSUE_CATEGORIES, URGENCY_KEYWORDS};
pub use codes::CodeExtractor;


/// What the analyzer found in a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub brand: Option<String>,
    /// Codes valid for `brand`, in extraction order.
    pub codes: Vec<String>,
    /// Issue category keys, in catalog order.
    pub issues: Vec<String>,
    pub urgent: bool,
    pub message: String,
}

impl AnalysisResult {
    /// Comma-joined issue list, as handed to the conversation store.
    pub fn issue_type(&self) -> String {
        self.issues.join(",")
    }
}

pub struct Analyzer<'kb> {
    kb: &'kb KnowledgeBase,
    extractor: CodeExtractor,
}

impl<'kb> Analyzer<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Result<Self> {
        Ok(Self {
            kb,
            extractor: CodeExtractor::new()?,
        })
    }

    pub fn analyze(&self, message: &str) -> AnalysisResult {
        let lowered = message.to_lowercase();

        let brand = self.detect_brand(&lowered);
        let codes = match brand {
            Some(brand) => self
                .extractor
                .extract(message)
                .into_iter()
                .filter(|code| brand.codes.contains_key(code))
                .collect(),
            None => Vec::new(),
        };
        let issues = detect_issues(&lowered);
        let urgent = is_urgent(&lowered);

        debug!(
            brand = brand.map(|b| b.key.as_str()),
            ?codes,
            ?issues,
            urgent,
            "message analyzed"
        );

        AnalysisResult {
            brand: brand.map(|b| b.key.clone()),
            codes,
            issues,
            urgent,
            message: message.to_string(),
        }
    }

    /// First brand, in declaration order, with a synonym in the message.
    fn detect_brand(&self, lowered: &str) -> Option<&'kb Brand> {
        let kb = self.kb;
        kb.brands().iter().find(|brand| {
            kb.synonyms(&brand.key)
                .iter()
                .any(|synonym| lowered.contains(synonym.as_str()))
        })
    }
}

pub fn detect_issues(lowered: &str) -> Vec<String> {
    ISSUE_CATEGORIES
        .iter()
        .filter(|category| category.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|category| category.key.to_string())
        .collect()
}

pub fn is_urgent(lowered: &str) -> bool {
    URGENCY_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
