use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

mod error;
mod loader;

pub use error::KnowledgeBaseError;

/// Built-in catalog, compiled into the binary.
const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../../assets/knowledge_base.toml");

#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    pub key: String,
    pub name: String,
    pub models: Vec<String>,
    /// Error code -> description. Codes are only unique within a brand.
    pub codes: BTreeMap<String, String>,
    /// Issue category -> ordered diagnostic steps.
    pub diagnostics: BTreeMap<String, Vec<String>>,
}

impl Brand {
    pub fn describe_code(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn diagnostic_steps(&self, category: &str) -> Option<&[String]> {
        self.diagnostics.get(category).map(Vec::as_slice)
    }
}

/// Read-only catalog of brands, detection synonyms and safety rules.
///
/// Brands keep their declaration order, which is also the order brand
/// detection walks them in.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    brands: Vec<Brand>,
    synonyms: HashMap<String, Vec<String>>,
    safety_rules: Vec<String>,
}

impl KnowledgeBase {
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Self::from_toml_str(BUILTIN_KNOWLEDGE_BASE)
    }

    /// All brands, in declaration order.
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Brands keyed by their identifier.
    pub fn brands_by_key(&self) -> BTreeMap<&str, &Brand> {
        self.brands.iter().map(|b| (b.key.as_str(), b)).collect()
    }

    pub fn brand(&self, key: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.key == key)
    }

    /// Lower-cased detection aliases. Always contains the brand key itself.
    pub fn synonyms(&self, key: &str) -> &[String] {
        self.synonyms.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn safety_rules(&self) -> &[String] {
        &self.safety_rules
    }
}
