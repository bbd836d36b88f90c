use super::{ExtractContext, Extractor};
use crate::db::{category, MasterDb};
use crate::error::Result;
use crate::model::{SupportCard, UmDatabase};

pub struct SupportCardExtractor;

const SUPPORT_CARD_SQL: &str = r#"
    SELECT s.id, t.text, s.chara_id, s.command_id
    FROM support_card_data AS s
    JOIN text_data AS t ON t."index" = s.id AND t.category = ?1
"#;

const LEGACY_SUPPORT_CARD_SQL: &str = r#"
    SELECT s.id, t.text, s.chara_id
    FROM support_card_data AS s
    JOIN text_data AS t ON t."index" = s.id AND t.category = ?1
"#;

impl Extractor for SupportCardExtractor {
    fn name(&self) -> &'static str {
        "support_card"
    }

    fn extract(&self, db: &MasterDb, ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let with_command = ctx.schema.has_support_card_command();
        let sql = if with_command {
            SUPPORT_CARD_SQL
        } else {
            LEGACY_SUPPORT_CARD_SQL
        };

        let rows = db.query(self.name(), sql, [category::SUPPORT_CARD_NAME], |row| {
            Ok(SupportCard {
                id: row.get(0)?,
                name: row.get(1)?,
                chara_id: row.get(2)?,
                command_id: if with_command { row.get(3)? } else { 0 },
            })
        })?;
        doc.support_card.extend(rows);
        Ok(())
    }
}
