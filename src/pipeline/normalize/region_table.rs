use once_cell::sync::Lazy;
use regex::Regex;

/// Spelling variants of Syrian governorates, in lookup order, mapped to the canonical label.
pub const SYRIA_REGION_ALIASES: &[(&str, &str)] = &[
    ("Aleppo", "Aleppo"),
    ("Damascus", "Damascus"),
    ("Tartus", "Tartus"),
    ("Idlib", "Idlib"),
    ("Quneitra", "Quneitra"),
    ("Homs", "Homs (Hims)"),
    ("Hims", "Homs (Hims)"),
    ("Hasaka", "Hasaka (Al Haksa)"),
    ("Al-Hasakah", "Hasaka (Al Haksa)"),
    ("Hassakeh", "Hasaka (Al Haksa)"),
    ("Al Hasakah", "Hasaka (Al Haksa)"),
    ("Raqqa", "Ar Raqqah"),
    ("Ar Raqqah", "Ar Raqqah"),
    ("Ar-Raqqah", "Ar Raqqah"),
    ("Latakia", "Lattakia"),
    ("Lattakia", "Lattakia"),
    ("As Suwayda", "As Suwayda'"),
    ("As-Suwayda", "As Suwayda'"),
    ("Sweida", "As Suwayda'"),
    ("Daraa", "Dar`a"),
    ("Dar'a", "Dar`a"),
    ("Dar`a", "Dar`a"),
    ("Deir ez-Zor", "Dayr Az Zawr"),
    ("Deir Al-Zor", "Dayr Az Zawr"),
    ("Dayr Az Zawr", "Dayr Az Zawr"),
    ("Deir ez Zor", "Dayr Az Zawr"),
    ("Hama", "Hamah"),
    ("Hamah", "Hamah"),
    ("Rif Dimashq", "Rif Dimashq"),
    ("Rural Damascus", "Rif Dimashq"),
];

static GOVERNORATE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+governorate\s*$").expect("static pattern is valid"));

/// Drop a trailing "governorate" word and surrounding whitespace.
pub fn strip_governorate_suffix(raw: &str) -> String {
    GOVERNORATE_SUFFIX.replace(raw.trim(), "").trim().to_string()
}

/// Exact-match canonicalizer; names it does not know pass through unchanged.
#[derive(Debug, Clone)]
pub struct RegionTable {
    entries: Vec<(String, String)>,
}

impl RegionTable {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(variant, canonical)| (variant.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    pub fn syria() -> Self {
        Self::new(SYRIA_REGION_ALIASES)
    }

    /// Canonical label for an exact spelling, if known.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(variant, _)| variant == name)
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Strip the governorate suffix, then map; unknown names are returned as cleaned.
    pub fn canonicalize(&self, raw: &str) -> String {
        let cleaned = strip_governorate_suffix(raw);
        match self.lookup(&cleaned) {
            Some(canonical) => canonical.to_string(),
            None => cleaned,
        }
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.entries.iter().any(|(_, canonical)| canonical == name)
    }

    /// Distinct canonical labels in first-seen order.
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, canonical) in &self.entries {
            if !names.contains(&canonical.as_str()) {
                names.push(canonical);
            }
        }
        names
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::syria()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governorate_suffix_is_removed_case_insensitively() {
        assert_eq!(strip_governorate_suffix("Hims Governorate"), "Hims");
        assert_eq!(strip_governorate_suffix("  Aleppo governorate "), "Aleppo");
        assert_eq!(strip_governorate_suffix("Idlib GOVERNORATE"), "Idlib");
        assert_eq!(strip_governorate_suffix("Rif Dimashq"), "Rif Dimashq");
    }

    #[test]
    fn test_hims_governorate_maps_to_homs() {
        let table = RegionTable::syria();
        assert_eq!(table.canonicalize("Hims Governorate"), "Homs (Hims)");
        assert_eq!(table.canonicalize("Homs"), "Homs (Hims)");
    }

    #[test]
    fn test_spelling_variants_collapse() {
        let table = RegionTable::syria();
        assert_eq!(table.canonicalize("Deir ez-Zor governorate"), "Dayr Az Zawr");
        assert_eq!(table.canonicalize("Rural Damascus"), "Rif Dimashq");
        assert_eq!(table.canonicalize("Dar'a"), "Dar`a");
        assert_eq!(table.canonicalize("Sweida"), "As Suwayda'");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let table = RegionTable::syria();
        assert_eq!(table.canonicalize("Golan Heights"), "Golan Heights");
        assert!(!table.is_canonical("Golan Heights"));
    }

    #[test]
    fn test_lookup_is_exact_not_case_folded() {
        let table = RegionTable::syria();
        assert_eq!(table.lookup("aleppo"), None);
        assert_eq!(table.lookup("Aleppo"), Some("Aleppo"));
    }

    #[test]
    fn test_canonical_set_has_fourteen_governorates() {
        let table = RegionTable::syria();
        let names = table.canonical_names();
        assert_eq!(names.len(), 14);
        assert!(names.contains(&"Homs (Hims)"));
        assert!(table.is_canonical("Hamah"));
    }
}
