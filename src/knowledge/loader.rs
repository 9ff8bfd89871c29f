use super::{Brand, KnowledgeBase, KnowledgeBaseError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawKnowledgeBase {
    #[serde(default)]
    safety_rules: Vec<String>,
    #[serde(default)]
    brands: Vec<RawBrand>,
}

#[derive(Debug, Deserialize)]
struct RawBrand {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    models: Vec<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    codes: BTreeMap<String, String>,
    #[serde(default)]
    diagnostics: BTreeMap<String, Vec<String>>,
}

impl KnowledgeBase {
    pub fn load(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let content = fs::read_to_string(path).map_err(|source| KnowledgeBaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, KnowledgeBaseError> {
        let raw: RawKnowledgeBase = toml::from_str(content)?;

        if raw.brands.is_empty() {
            return Err(KnowledgeBaseError::NoBrands);
        }

        let mut seen = HashSet::new();
        let mut brands = Vec::with_capacity(raw.brands.len());
        let mut synonyms = HashMap::new();

        for (index, raw_brand) in raw.brands.into_iter().enumerate() {
            let key = raw_brand.key.trim().to_string();
            if key.is_empty() {
                return Err(KnowledgeBaseError::EmptyKey { index });
            }
            if !seen.insert(key.clone()) {
                return Err(KnowledgeBaseError::DuplicateBrand(key));
            }
            if raw_brand.name.trim().is_empty() {
                return Err(KnowledgeBaseError::MissingName(key));
            }
            if raw_brand.codes.is_empty() {
                return Err(KnowledgeBaseError::EmptyCodeTable(key));
            }

            synonyms.insert(key.clone(), normalize_synonyms(&key, raw_brand.synonyms));
            brands.push(Brand {
                key,
                name: raw_brand.name,
                models: raw_brand.models,
                codes: raw_brand.codes,
                diagnostics: raw_brand.diagnostics,
            });
        }

        debug!(
            brands = brands.len(),
            safety_rules = raw.safety_rules.len(),
            "knowledge base loaded"
        );

        Ok(Self {
            brands,
            synonyms,
            safety_rules: raw.safety_rules,
        })
    }
}

/// Lower-cases the aliases, drops blanks and duplicates, and makes sure the
/// key itself comes first.
fn normalize_synonyms(key: &str, declared: Vec<String>) -> Vec<String> {
    let mut result = vec![key.to_lowercase()];
    for synonym in declared {
        let synonym = synonym.trim().to_lowercase();
        if !synonym.is_empty() && !result.contains(&synonym) {
            result.push(synonym);
        }
    }
    result
}
