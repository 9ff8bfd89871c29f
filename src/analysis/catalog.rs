/// A coarse fault classification and the lower-case keywords that flag it.
#[derive(Debug)]
pub struct IssueCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// Declaration order is the order detected categories are reported in.
pub const ISSUE_CATEGORIES: &[IssueCategory] = &[
    IssueCategory {
        key: "porte",
        label: "Porte",
        keywords: &["porte", "fermeture", "ouverture", "cellule", "door"],
    },
    IssueCategory {
        key: "moteur",
        label: "Moteur",
        keywords: &["moteur", "variateur", "vibration", "motor"],
    },
    IssueCategory {
        key: "frein",
        label: "Frein",
        keywords: &["frein", "brake"],
    },
    IssueCategory {
        key: "communication",
        label: "Communication",
        keywords: &["communication", "liaison", "réseau", "bus can"],
    },
    IssueCategory {
        key: "nivellement",
        label: "Nivellement",
        keywords: &["nivellement", "niveau", "décalage", "leveling"],
    },
    IssueCategory {
        key: "surcharge",
        label: "Surcharge",
        keywords: &["surcharge", "poids", "overload"],
    },
    IssueCategory {
        key: "survitesse",
        label: "Survitesse",
        keywords: &["survitesse", "parachute", "vitesse excessive", "overspeed"],
    },
];

/// Any of these in a message marks the fault as time-critical.
pub const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "urgence",
    "bloqué",
    "coincé",
    "piégé",
    "enfermé",
    "passager",
    "emergency",
    "stuck",
    "trapped",
];

pub fn issue_label(key: &str) -> Option<&'static str> {
    ISSUE_CATEGORIES
        .iter()
        .find(|category| category.key == key)
        .map(|category| category.label)
}
