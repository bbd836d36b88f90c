//! Entity extractors.
//!
//! Each extractor joins snapshot tables into one kind of record and appends
//! the records to its collection of the document, in query row order.
//! Extractors are independent: none reads another's output.

mod chara;
mod live_song;
mod race;
mod skill;
mod succession;
mod support_card;
mod text;

pub use chara::CharaExtractor;
pub use live_song::LiveSongExtractor;
pub use race::{RaceInstanceExtractor, SpecialCaseRaceExtractor, WinsSaddleExtractor};
pub use skill::SkillExtractor;
pub use succession::SuccessionRelationExtractor;
pub use support_card::SupportCardExtractor;
pub use text::TextCategoryExtractor;

use crate::db::MasterDb;
use crate::error::Result;
use crate::icon::IconEmbedder;
use crate::model::UmDatabase;

/// Snapshot layout the extractors target.
///
/// Older snapshots lack `support_card_data.command_id` and the live square
/// table, so the legacy variant skips both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaVersion {
    Legacy,
    #[default]
    Current,
}

impl SchemaVersion {
    pub fn has_support_card_command(self) -> bool {
        self == Self::Current
    }

    pub fn has_live_squares(self) -> bool {
        self == Self::Current
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Inputs shared by every extractor besides the database
#[derive(Debug, Clone)]
pub struct ExtractContext {
    pub schema: SchemaVersion,
    pub icons: IconEmbedder,
}

/// One entity mapping from snapshot rows to document records
pub trait Extractor {
    /// Name used in logs and error context
    fn name(&self) -> &'static str;

    /// Whether this extractor runs for the given schema
    fn applies_to(&self, _schema: SchemaVersion) -> bool {
        true
    }

    /// Append this entity's records to the document
    fn extract(&self, db: &MasterDb, ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()>;
}

/// All extractors in document order
pub fn pipeline() -> Vec<Box<dyn Extractor>> {
    vec![
        Box::new(CharaExtractor),
        Box::new(TextCategoryExtractor::cards()),
        Box::new(SupportCardExtractor),
        Box::new(SuccessionRelationExtractor),
        Box::new(RaceInstanceExtractor),
        Box::new(WinsSaddleExtractor),
        Box::new(SpecialCaseRaceExtractor),
        Box::new(SkillExtractor),
        Box::new(TextCategoryExtractor::team_stadium_score_bonuses()),
        Box::new(TextCategoryExtractor::stories()),
        Box::new(LiveSongExtractor),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order() {
        let names: Vec<_> = pipeline().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "chara",
                "card",
                "support_card",
                "succession_relation",
                "race_instance",
                "wins_saddle",
                "special_case_race",
                "skill",
                "team_stadium_score_bonus",
                "story",
                "live_song",
            ]
        );
    }

    #[test]
    fn test_legacy_skips_live_songs() {
        let legacy: Vec<_> = pipeline()
            .into_iter()
            .filter(|e| e.applies_to(SchemaVersion::Legacy))
            .map(|e| e.name())
            .collect();
        assert_eq!(legacy.len(), 10);
        assert!(!legacy.contains(&"live_song"));
    }
}
