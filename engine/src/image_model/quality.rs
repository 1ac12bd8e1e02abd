use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

use super::ModelFamily;

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
    Hash,
    PartialEq,
    Eq,
    Default,
)]
#[strum(serialize_all = "lowercase")]
pub enum Quality {
    #[default]
    Low,
    Medium,
    High,
    Standard,
    Hd,
}

/// Input quality, then what family A and family B accept for it.
pub const QUALITY_TABLE: [(Quality, Quality, Quality); 5] = [
    (Quality::Low, Quality::Low, Quality::Standard),
    (Quality::Medium, Quality::Medium, Quality::Standard),
    (Quality::High, Quality::High, Quality::Hd),
    (Quality::Standard, Quality::Medium, Quality::Standard),
    (Quality::Hd, Quality::High, Quality::Hd),
];

impl Quality {
    pub fn for_family(self, family: ModelFamily) -> Quality {
        let (_, inline, remote) = QUALITY_TABLE
            .iter()
            .find(|(input, _, _)| *input == self)
            .copied()
            .unwrap_or((self, self, self));
        match family {
            ModelFamily::InlineBase64 => inline,
            ModelFamily::RemoteUrl => remote,
        }
    }
}

/// Maps a quality string into the vocabulary of `family`.
/// Strings that aren't a known quality are returned as they are.
pub fn normalize_quality(family: ModelFamily, quality: &str) -> String {
    match Quality::from_str(quality) {
        Ok(q) => q.for_family(family).to_string(),
        Err(_) => quality.to_string(),
    }
}
