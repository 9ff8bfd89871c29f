use crate::analysis::{issue_label, AnalysisResult};
use crate::knowledge::{Brand, KnowledgeBase};
use std::fmt::Write;

pub const URGENCY_BANNER: &str =
    "🚨 **URGENCE DÉTECTÉE** - Sécurisez la zone et vérifiez qu'aucun passager n'est bloqué.";
pub const HEADER: &str = "🤖 **Assistant IA Ascenseurs**";
pub const SAFETY_HEADER: &str = "**⚠️ Sécurité:**";
pub const CLOSING_PROMPT: &str =
    "**Besoin d'aide supplémentaire ?** Décrivez plus de détails ou joignez une documentation technique !";

const MAX_MODELS: usize = 3;
const MAX_SAFETY_RULES: usize = 4;

/// Steps used when the detected brand has none of its own for a category.
const GENERIC_STEPS: &[(&str, &[&str])] = &[
    (
        "porte",
        &[
            "Vérifiez l'alimentation de l'opérateur de porte",
            "Contrôlez les capteurs et la barrière de sécurité",
            "Nettoyez les seuils et les guides",
            "Testez les contacts de verrouillage",
        ],
    ),
    (
        "moteur",
        &[
            "Vérifiez l'alimentation générale",
            "Contrôlez la température et la ventilation du moteur",
            "Lisez les défauts du variateur",
        ],
    ),
    (
        "frein",
        &[
            "Contrôlez l'entrefer du frein",
            "Vérifiez la bobine et son alimentation",
            "Testez le maintien à charge nominale",
        ],
    ),
];

/// Turns an analysis into the text shown to the technician.
pub struct Responder;

impl Responder {
    pub fn compose(result: &AnalysisResult, kb: &KnowledgeBase) -> String {
        let brand = result.brand.as_deref().and_then(|key| kb.brand(key));
        let mut out = String::new();

        if result.urgent {
            out.push_str(URGENCY_BANNER);
            out.push_str("\n\n");
        }

        out.push_str(HEADER);
        out.push_str("\n\n");

        if let Some(brand) = brand {
            Self::write_brand(&mut out, brand, &result.codes);
        }

        for issue in &result.issues {
            Self::write_issue(&mut out, issue, brand);
        }

        out.push_str(SAFETY_HEADER);
        out.push('\n');
        for rule in kb.safety_rules().iter().take(MAX_SAFETY_RULES) {
            let _ = writeln!(out, "- {}", rule);
        }
        out.push('\n');

        if let Some(brand) = brand {
            let _ = writeln!(
                out,
                "📞 **Support {}:** contactez le service technique {} si le défaut persiste.\n",
                brand.name, brand.name
            );
        }

        out.push_str(CLOSING_PROMPT);
        out
    }

    fn write_brand(out: &mut String, brand: &Brand, codes: &[String]) {
        let _ = writeln!(out, "**Marque détectée:** {}", brand.name);

        if brand.models.is_empty() {
            out.push('\n');
        } else {
            let shown: Vec<&str> = brand
                .models
                .iter()
                .take(MAX_MODELS)
                .map(String::as_str)
                .collect();
            let more = if brand.models.len() > MAX_MODELS { "..." } else { "" };
            let _ = writeln!(out, "**Modèles:** {}{}\n", shown.join(", "), more);
        }

        if codes.is_empty() {
            return;
        }
        out.push_str("**Codes d'erreur identifiés:**\n");
        for code in codes {
            let description = brand.describe_code(code).unwrap_or("Code non documenté");
            let _ = writeln!(out, "- `{}`: {}", code, description);
        }
        out.push('\n');
    }

    fn write_issue(out: &mut String, issue: &str, brand: Option<&Brand>) {
        let label = issue_label(issue).unwrap_or(issue);
        let _ = writeln!(out, "**Diagnostic {}:**", label);

        let brand_steps = brand.and_then(|b| b.diagnostic_steps(issue));
        match brand_steps {
            Some(steps) => write_steps(out, steps.iter().map(String::as_str)),
            None => {
                if let Some(steps) = generic_steps(issue) {
                    write_steps(out, steps.iter().copied());
                }
            }
        }
        out.push('\n');
    }
}

fn generic_steps(issue: &str) -> Option<&'static [&'static str]> {
    GENERIC_STEPS
        .iter()
        .find(|(key, _)| *key == issue)
        .map(|(_, steps)| *steps)
}

fn write_steps<'a>(out: &mut String, steps: impl Iterator<Item = &'a str>) {
    for (i, step) in steps.enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use pretty_assertions::assert_eq;

    fn compose(message: &str) -> String {
        let kb = KnowledgeBase::builtin().unwrap();
        let analyzer = Analyzer::new(&kb).unwrap();
        Responder::compose(&analyzer.analyze(message), &kb)
    }

    #[test]
    fn test_empty_message_response() {
        let expected = format!(
            "{}\n\n{}\n- Toujours couper l'alimentation\n- Porter les EPI obligatoires\n\
             - Utiliser les dispositifs de consignation\n\
             - Baliser l'accès palier avant toute intervention\n\n{}",
            HEADER, SAFETY_HEADER, CLOSING_PROMPT
        );
        assert_eq!(compose(""), expected);
    }

    #[test]
    fn test_otis_blocked_response() {
        let response = compose("Ascenseur Otis bloqué, code E1 affiché");
        assert!(response.starts_with(URGENCY_BANNER));
        assert!(response.contains("**Marque détectée:** Otis\n"));
        assert!(response.contains("**Modèles:** GeN2, SkyRise, SkyBuild...\n"));
        assert!(!response.contains("Gen360"));
        assert!(response.contains("- `E1`: Défaut capteur de porte\n"));
        assert!(response.contains("📞 **Support Otis:**"));

        let banner = response.find(URGENCY_BANNER).unwrap();
        let header = response.find(HEADER).unwrap();
        let brand = response.find("**Marque détectée:**").unwrap();
        let codes = response.find("`E1`").unwrap();
        let safety = response.find(SAFETY_HEADER).unwrap();
        let support = response.find("📞").unwrap();
        let closing = response.find(CLOSING_PROMPT).unwrap();
        assert!(banner < header && header < brand && brand < codes);
        assert!(codes < safety && safety < support && support < closing);
        assert!(response.ends_with(CLOSING_PROMPT));
    }

    #[test]
    fn test_kone_door_response_uses_brand_steps() {
        let response = compose("Kone F7 défaut fermeture");
        assert!(!response.contains(URGENCY_BANNER));
        assert!(response.starts_with(HEADER));
        // Exactly three models, so no truncation marker.
        assert!(response.contains("**Modèles:** MonoSpace, EcoSpace, MiniSpace\n"));
        assert!(response.contains("- `F7`: Temps dépassé fermeture porte\n"));
        assert!(response.contains(
            "**Diagnostic Porte:**\n1. Vérifier le temps de fermeture paramétré\n\
             2. Contrôler l'opérateur de porte AMD\n3. Inspecter les seuils et les guides de porte\n"
        ));
    }

    #[test]
    fn test_generic_steps_fallback() {
        // Schindler defines no brake steps.
        let response = compose("Schindler frein");
        assert!(response.contains("**Diagnostic Frein:**\n1. Contrôlez l'entrefer du frein\n"));
        assert!(!response.contains("**Codes d'erreur identifiés:**"));

        // Without a brand the generic table is used too.
        let response = compose("porte qui ne ferme plus");
        assert!(response.contains("**Diagnostic Porte:**\n1. Vérifiez l'alimentation de l'opérateur de porte\n"));
        assert!(!response.contains("📞"));
        assert!(!response.contains("**Marque détectée:**"));
    }

    #[test]
    fn test_issue_without_any_steps_renders_label_only() {
        let response = compose("problème de nivellement");
        assert!(response.contains("**Diagnostic Nivellement:**\n\n"));
        assert!(!response.contains("1. "));
    }

    #[test]
    fn test_omission_law() {
        let response = compose("Mitsubishi EF");
        assert!(!response.contains("URGENCE"));
        assert!(!response.contains("**Diagnostic"));
        assert!(response.contains("- `EF`: Défaut alimentation de sécurité\n"));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let kb = KnowledgeBase::builtin().unwrap();
        let analyzer = Analyzer::new(&kb).unwrap();
        let result = analyzer.analyze("Otis E1 porte bloquée, liaison perdue");
        assert_eq!(
            Responder::compose(&result, &kb),
            Responder::compose(&result, &kb)
        );
    }

    #[test]
    fn test_short_safety_list() {
        let kb = KnowledgeBase::from_toml_str(
            r#"
            safety_rules = ["Couper l'alimentation"]

            [[brands]]
            key = "orona"
            name = "Orona"
            codes = { E7 = "Défaut porte" }
            "#,
        )
        .unwrap();
        let analyzer = Analyzer::new(&kb).unwrap();
        let response = Responder::compose(&analyzer.analyze("orona"), &kb);
        assert!(response.contains(&format!("{}\n- Couper l'alimentation\n\n", SAFETY_HEADER)));
        // No models declared, so no models line at all.
        assert!(!response.contains("**Modèles:**"));
        assert!(response.contains("**Marque détectée:** Orona\n\n"));
    }
}
