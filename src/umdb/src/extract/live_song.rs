use super::{ExtractContext, Extractor, SchemaVersion};
use crate::annotations::live_show_context;
use crate::db::{category, MasterDb};
use crate::error::Result;
use crate::model::{LiveSong, UmDatabase};

/// Live squares with localized title/content and their performance bonuses
pub struct LiveSongExtractor;

/// Number of `perf_type_N` / `perf_value_N` column pairs
const PERF_SLOTS: usize = 5;

/// Index of `perf_type_1` in [`LIVE_SQUARE_SQL`]
const FIRST_PERF_COLUMN: usize = 5;

const LIVE_SQUARE_SQL: &str = r#"
    SELECT s.id, tt.text, tc.text, s.master_bonus_id, s.square_type,
           s.perf_type_1, s.perf_value_1,
           s.perf_type_2, s.perf_value_2,
           s.perf_type_3, s.perf_value_3,
           s.perf_type_4, s.perf_value_4,
           s.perf_type_5, s.perf_value_5
    FROM single_mode_live_square AS s
    LEFT JOIN text_data AS tt
        ON tt.category = ?1 AND tt."index" = s.square_title_text_id
    LEFT JOIN text_data AS tc
        ON tc.category = ?2 AND tc."index" = s.square_content_text_id
"#;

/// Leading (type, value) pairs up to, not including, the first non-positive type
fn leading_perfs(pairs: impl IntoIterator<Item = (Option<i32>, i32)>) -> Vec<(i32, i32)> {
    pairs
        .into_iter()
        .map_while(|(perf_type, value)| match perf_type {
            Some(t) if t > 0 => Some((t, value)),
            _ => None,
        })
        .collect()
}

impl Extractor for LiveSongExtractor {
    fn name(&self) -> &'static str {
        "live_song"
    }

    fn applies_to(&self, schema: SchemaVersion) -> bool {
        schema.has_live_squares()
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let rows = db.query(
            self.name(),
            LIVE_SQUARE_SQL,
            [category::LIVE_SQUARE_TITLE, category::LIVE_SQUARE_CONTENT],
            |row| {
                let mut song = LiveSong {
                    id: row.get(0)?,
                    square_title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    square_content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    master_bonus_id: row.get::<_, Option<i32>>(3)?.unwrap_or_default(),
                    square_type: row.get::<_, Option<i32>>(4)?.unwrap_or_default(),
                    ..Default::default()
                };

                let mut pairs = Vec::with_capacity(PERF_SLOTS);
                for slot in 0..PERF_SLOTS {
                    let column = FIRST_PERF_COLUMN + slot * 2;
                    let perf_type = row.get::<_, Option<i32>>(column)?;
                    let value = row.get::<_, Option<i32>>(column + 1)?.unwrap_or_default();
                    pairs.push((perf_type, value));
                }
                for (perf_type, value) in leading_perfs(pairs) {
                    song.push_perf(perf_type, value);
                }

                if let Some(context) = live_show_context(song.id) {
                    song.live_show_context = context.to_string();
                }
                Ok(song)
            },
        )?;
        doc.live_song.extend(rows);
        Ok(())
    }
}
