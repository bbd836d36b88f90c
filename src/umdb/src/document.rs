//! Assembly of the export document from all extractors.

use crate::db::MasterDb;
use crate::error::Result;
use crate::extract::{self, ExtractContext, SchemaVersion};
use crate::icon::{IconEmbedder, DEFAULT_ICON_DIR};
use crate::model::UmDatabase;
use std::fmt;
use std::path::PathBuf;

/// Version label used when the caller supplies none
pub const DEFAULT_VERSION: &str = "test";

/// Inputs of one export run besides the snapshot itself
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub version: String,
    pub schema: SchemaVersion,
    pub icon_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            schema: SchemaVersion::default(),
            icon_dir: PathBuf::from(DEFAULT_ICON_DIR),
        }
    }
}

/// Run every extractor in document order and return the finished document
pub fn build_document(db: &MasterDb, options: &ExportOptions) -> Result<UmDatabase> {
    let mut doc = UmDatabase {
        version: options.version.clone(),
        ..Default::default()
    };
    let ctx = ExtractContext {
        schema: options.schema,
        icons: IconEmbedder::new(&options.icon_dir),
    };

    for extractor in extract::pipeline() {
        if !extractor.applies_to(ctx.schema) {
            tracing::debug!(extractor = extractor.name(), schema = %ctx.schema, "skipped");
            continue;
        }
        let before = DocumentSummary::of(&doc).total();
        extractor.extract(db, &ctx, &mut doc)?;
        let records = DocumentSummary::of(&doc).total() - before;
        tracing::debug!(extractor = extractor.name(), records, "extracted");
    }

    Ok(doc)
}

/// Record counts of a document, for progress output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub chara: usize,
    pub chara_with_icon: usize,
    pub card: usize,
    pub support_card: usize,
    pub succession_relation: usize,
    pub race_instance: usize,
    pub wins_saddle: usize,
    pub special_case_race: usize,
    pub skill: usize,
    pub team_stadium_score_bonus: usize,
    pub story: usize,
    pub live_song: usize,
}

impl DocumentSummary {
    pub fn of(doc: &UmDatabase) -> Self {
        Self {
            chara: doc.chara.len(),
            chara_with_icon: doc.chara.iter().filter(|c| !c.icon_url.is_empty()).count(),
            card: doc.card.len(),
            support_card: doc.support_card.len(),
            succession_relation: doc.succession_relation.len(),
            race_instance: doc.race_instance.len(),
            wins_saddle: doc.wins_saddle.len(),
            special_case_race: doc.special_case_race.len(),
            skill: doc.skill.len(),
            team_stadium_score_bonus: doc.team_stadium_score_bonus.len(),
            story: doc.story.len(),
            live_song: doc.live_song.len(),
        }
    }

    /// Number of records across all collections
    pub fn total(&self) -> usize {
        self.chara
            + self.card
            + self.support_card
            + self.succession_relation
            + self.race_instance
            + self.wins_saddle
            + self.special_case_race
            + self.skill
            + self.team_stadium_score_bonus
            + self.story
            + self.live_song
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  chara:                    {} ({} with icon)",
            self.chara, self.chara_with_icon
        )?;
        writeln!(f, "  card:                     {}", self.card)?;
        writeln!(f, "  support_card:             {}", self.support_card)?;
        writeln!(f, "  succession_relation:      {}", self.succession_relation)?;
        writeln!(f, "  race_instance:            {}", self.race_instance)?;
        writeln!(f, "  wins_saddle:              {}", self.wins_saddle)?;
        writeln!(f, "  special_case_race:        {}", self.special_case_race)?;
        writeln!(f, "  skill:                    {}", self.skill)?;
        writeln!(f, "  team_stadium_score_bonus: {}", self.team_stadium_score_bonus)?;
        writeln!(f, "  story:                    {}", self.story)?;
        write!(f, "  live_song:                {}", self.live_song)
    }
}
