use serde::{Serialize, Serializer};
use std::fmt;

/// The six regions the monthly casualty chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionBucket {
    Aleppo,
    Damascus,
    Idlib,
    Daraa,
    Homs,
    Other,
}

/// Lowercase substrings tested in order; the first rule with any match wins.
pub const BUCKET_RULES: &[(&[&str], RegionBucket)] = &[
    (&["aleppo", "halab"], RegionBucket::Aleppo),
    (&["damascus", "dimashq"], RegionBucket::Damascus),
    (&["idlib", "edleb"], RegionBucket::Idlib),
    (&["daraa", "dara"], RegionBucket::Daraa),
    (&["homs", "hims"], RegionBucket::Homs),
];

impl RegionBucket {
    /// Output order of the bucket keys in each monthly record.
    pub const ALL: [RegionBucket; 6] = [
        RegionBucket::Aleppo,
        RegionBucket::Damascus,
        RegionBucket::Idlib,
        RegionBucket::Daraa,
        RegionBucket::Homs,
        RegionBucket::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegionBucket::Aleppo => "Aleppo",
            RegionBucket::Damascus => "Damascus",
            RegionBucket::Idlib => "Idlib",
            RegionBucket::Daraa => "Daraa",
            RegionBucket::Homs => "Homs",
            RegionBucket::Other => "Other",
        }
    }

    /// Classify a free-text admin-1 name.
    pub fn classify(region: &str) -> RegionBucket {
        Self::classify_with(BUCKET_RULES, region)
    }

    pub fn classify_with(rules: &[(&[&str], RegionBucket)], region: &str) -> RegionBucket {
        let val = region.to_lowercase();
        rules
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| val.contains(needle)))
            .map(|(_, bucket)| *bucket)
            .unwrap_or(RegionBucket::Other)
    }
}

/// Bucket names double as the keys of each monthly record.
impl Serialize for RegionBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for RegionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
