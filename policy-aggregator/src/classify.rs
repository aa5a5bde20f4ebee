//! Keyword heuristics that map free-text upstream fields onto the closed
//! enumerations of [`NormalizedItem`](crate::types::NormalizedItem).
//!
//! Every classifier lower-cases its input and walks its keyword groups in
//! order; the first group that matches wins. Group order is priority.

/// Legislative lifecycle stage from a DIP status string.
pub mod status {
    use crate::types::{DipVorgang, Status};
    use crate::utils::text::contains_any;

    const PUBLISHED: &[&str] = &["verkündet", "promulgated", "enacted"];
    const EFFECTIVE: &[&str] = &["in kraft", "in force"];
    const SIGNED: &[&str] = &["unterzeichnet", "signed"];
    const UPPER_CHAMBER: &[&str] = &["bundesrat", "upper chamber"];
    const APPROVAL: &[&str] = &["zugestimmt", "approved", "consent"];
    const PASSED: &[&str] = &["beschlossen", "angenommen", "passed", "adopted"];
    const STOPPED: &[&str] = &["erledigt", "abgelehnt", "zurückgezogen", "rejected", "withdrawn"];
    const COMMITTEE: &[&str] = &["beratung", "überwiesen", "ausschuss", "committee", "referred"];

    /// Used when a record carries none of the status fields.
    pub const DEFAULT_RAW_STATUS: &str = "Eingebracht";

    pub fn classify(raw: &str) -> Status {
        let st = raw.to_lowercase();

        if contains_any(&st, PUBLISHED) {
            Status::Published
        } else if contains_any(&st, EFFECTIVE) {
            Status::Effective
        } else if contains_any(&st, SIGNED) {
            Status::Signed
        } else if contains_any(&st, UPPER_CHAMBER) && contains_any(&st, APPROVAL) {
            // The chamber name alone shows up in "dem Bundesrat zugeleitet" and
            // similar early-stage phrases.
            Status::PassedBundesrat
        } else if contains_any(&st, PASSED) {
            Status::PassedBundestag
        } else if contains_any(&st, STOPPED) {
            Status::Stopped
        } else if contains_any(&st, COMMITTEE) {
            Status::Committee
        } else {
            // "eingebracht", "introduced" and anything unrecognised.
            Status::Draft
        }
    }

    /// First non-blank of `beratungsstand`, `aktueller_stand`,
    /// `vorgangsstatus`, else [`DEFAULT_RAW_STATUS`].
    pub fn raw_status(vorgang: &DipVorgang) -> &str {
        [
            vorgang.beratungsstand.as_deref(),
            vorgang.aktueller_stand.as_deref(),
            vorgang.vorgangsstatus.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_RAW_STATUS)
    }
}

/// Subject-matter bucket from a subject tag or free text.
pub mod category {
    use crate::types::Category;
    use crate::utils::text::contains_any;

    const GROUPS: &[(Category, &[&str])] = &[
        (
            Category::Economy,
            &["wirtschaft", "finanz", "haushalt", "steuer", "economy", "finance", "tax"],
        ),
        (
            Category::Environment,
            &["umwelt", "klima", "energie", "environment", "climate"],
        ),
        (
            Category::Social,
            &["arbeit", "soziales", "rente", "familie", "social", "pension"],
        ),
        (
            Category::Digital,
            &["medien", "digital", "datenschutz", "datenpolitik", "internet"],
        ),
        (
            Category::Justice,
            &["recht", "innere", "justiz", "gericht", "justice", "court"],
        ),
        (
            Category::Defense,
            &["verteidigung", "bundeswehr", "defense", "defence"],
        ),
        (Category::Health, &["gesundheit", "pflege", "health"]),
    ];

    /// Classifies the first subject tag only; an empty list is `Other`.
    pub fn from_subjects<S: AsRef<str>>(subjects: &[S]) -> Category {
        match subjects.first() {
            Some(first) => from_text(first.as_ref()),
            None => Category::Other,
        }
    }

    pub fn from_text(text: &str) -> Category {
        if text.trim().is_empty() {
            return Category::Other;
        }
        let haupt = text.to_lowercase();
        GROUPS
            .iter()
            .find(|(_, keywords)| contains_any(&haupt, keywords))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Other)
    }
}

/// Document kind from a DIP `vorgangstyp` label.
pub mod item_type {
    use crate::types::ItemType;
    use crate::utils::text::contains_any;

    pub fn classify(label: &str) -> ItemType {
        let vt = label.to_lowercase();
        if contains_any(&vt, &["gesetz", "bill"]) {
            ItemType::Bill
        } else if contains_any(&vt, &["verordnung", "ordinance", "regulation"]) {
            ItemType::Ordinance
        } else if contains_any(&vt, &["antrag", "motion"]) {
            ItemType::Motion
        } else {
            // The DIP query is already filtered to legislation.
            ItemType::Bill
        }
    }
}
