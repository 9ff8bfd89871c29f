use super::TestUtils;
use crate::analysis::Analyzer;
use crate::responder::{Responder, CLOSING_PROMPT, HEADER, SAFETY_HEADER, URGENCY_BANNER};
use pretty_assertions::assert_eq;

#[test]
fn test_example_prompts() {
    let kb = TestUtils::knowledge_base();
    let analyzer = Analyzer::new(&kb).unwrap();

    let result = analyzer.analyze("Otis E1 porte bloquée");
    assert_eq!(result.brand.as_deref(), Some("otis"));
    assert_eq!(result.codes, vec!["E1"]);
    assert_eq!(result.issues, vec!["porte"]);
    assert!(result.urgent);

    let response = Responder::compose(&result, &kb);
    // Otis has its own door procedure.
    assert!(response.contains("1. Contrôler l'alignement du capteur de porte GeN2\n"));

    let result = analyzer.analyze("Schindler 88 récurrent");
    assert_eq!(result.brand.as_deref(), Some("schindler"));
    assert_eq!(result.codes, vec!["88"]);
    let response = Responder::compose(&result, &kb);
    assert!(response.contains("- `88`: Défaut porte\n"));
    assert!(response.contains("**Modèles:** 3300, 5500, 7000\n"));
}

#[test]
fn test_unknown_brand_codes_are_dropped() {
    let kb = TestUtils::knowledge_base();
    let analyzer = Analyzer::new(&kb).unwrap();

    let result = analyzer.analyze("Code E1 et 88 sur un appareil inconnu");
    assert_eq!(result.brand, None);
    assert!(result.codes.is_empty());

    let response = Responder::compose(&result, &kb);
    assert!(!response.contains("Codes d'erreur"));
    assert!(!response.contains("E1"));
}

#[test]
fn test_code_meaning_depends_on_brand() {
    let kb = TestUtils::knowledge_base();
    let analyzer = Analyzer::new(&kb).unwrap();

    // E5 only exists for Mitsubishi; E01 only for ThyssenKrupp.
    let result = analyzer.analyze("Thyssen Synergy E01 E5");
    assert_eq!(result.brand.as_deref(), Some("thyssenkrupp"));
    assert_eq!(result.codes, vec!["E01"]);

    let response = Responder::compose(&result, &kb);
    assert!(response.contains("**Modèles:** Synergy, Evolution, Enta...\n"));
    assert!(response.contains("- `E01`: Défaut chaîne de sécurité\n"));
    assert!(response.contains("📞 **Support ThyssenKrupp:**"));
}

#[test]
fn test_empty_message_shape() {
    let kb = TestUtils::knowledge_base();
    let analyzer = Analyzer::new(&kb).unwrap();
    let response = Responder::compose(&analyzer.analyze(""), &kb);

    assert!(response.starts_with(HEADER));
    assert!(response.contains(SAFETY_HEADER));
    assert!(response.ends_with(CLOSING_PROMPT));
    assert!(!response.contains(URGENCY_BANNER));
    assert!(!response.contains("**Marque détectée:**"));
    assert!(!response.contains("**Diagnostic"));
    assert_eq!(response.matches("\n- ").count(), 4);
}
