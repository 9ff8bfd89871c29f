use regex::Regex;

/// Pulls error-code candidates out of free text.
///
/// The three pattern classes run independently over the upper-cased text and
/// their matches are concatenated in a fixed order: letter+digits, bare
/// numbers, then acronyms. Nothing is deduplicated here; validation against a
/// brand's code table happens later.
pub struct CodeExtractor {
    letter_digits: Regex,
    numbers: Regex,
    acronyms: Regex,
}

impl CodeExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            letter_digits: Regex::new(r"\b[A-Z]\d+\b")?,
            numbers: Regex::new(r"\b\d{1,3}\b")?,
            acronyms: Regex::new(r"\b[A-Z]{2,4}\b")?,
        })
    }

    pub fn extract(&self, message: &str) -> Vec<String> {
        let upper = message.to_uppercase();
        [&self.letter_digits, &self.numbers, &self.acronyms]
            .iter()
            .flat_map(|pattern| pattern.find_iter(&upper))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
