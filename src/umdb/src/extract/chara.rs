use super::{ExtractContext, Extractor};
use crate::db::{category, MasterDb};
use crate::error::Result;
use crate::model::{Chara, UmDatabase};

/// Characters that have both a name and a cast name, with inlined icons
pub struct CharaExtractor;

const CHARA_SQL: &str = r#"
    SELECT t1."index", t1.text, t2.text
    FROM text_data AS t1
    JOIN text_data AS t2 ON t2."index" = t1."index" AND t2.category = ?2
    WHERE t1.category = ?1
"#;

impl Extractor for CharaExtractor {
    fn name(&self) -> &'static str {
        "chara"
    }

    fn extract(&self, db: &MasterDb, ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let rows = db.query(
            self.name(),
            CHARA_SQL,
            [category::CHARA_NAME, category::CHARA_CAST_NAME],
            |row| {
                Ok(Chara {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    cast_name: row.get(2)?,
                    icon_url: String::new(),
                })
            },
        )?;

        doc.chara.extend(rows.into_iter().map(|mut chara| {
            chara.icon_url = ctx.icons.embed(chara.id);
            chara
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_support::{context, run, run_with};
    use crate::extract::SchemaVersion;
    use crate::icon::IconEmbedder;
    use crate::testing::fixture_db_with;

    const ONE_CHARA: &str = r#"
        INSERT INTO text_data (category, "index", text) VALUES
            (170, 1, 'Test'), (7, 1, 'Voice');
    "#;

    #[test]
    fn test_single_chara_without_icon() {
        let db = fixture_db_with(ONE_CHARA);
        let doc = run(&CharaExtractor, &db);

        assert_eq!(doc.chara.len(), 1);
        let chara = &doc.chara[0];
        assert_eq!(chara.id, 1);
        assert_eq!(chara.name, "Test");
        assert_eq!(chara.cast_name, "Voice");
        assert_eq!(chara.icon_url, "");
    }

    #[test]
    fn test_chara_without_cast_name_excluded() {
        let db = fixture_db_with(
            r#"INSERT INTO text_data (category, "index", text) VALUES
                (170, 1, 'Cast'), (7, 1, 'Voice'),
                (170, 2, 'Nameless'),
                (7, 3, 'Orphan voice');"#,
        );
        let doc = run(&CharaExtractor, &db);

        let ids: Vec<_> = doc.chara.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_chara_icon_embedded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chr_icon_training_1.png"), b"png").unwrap();

        let db = fixture_db_with(ONE_CHARA);
        let ctx = ExtractContext {
            icons: IconEmbedder::new(dir.path()),
            ..context(SchemaVersion::Current)
        };
        let doc = run_with(&CharaExtractor, &db, &ctx);

        assert_eq!(doc.chara[0].icon_url, "data:image/png;base64,cG5n");
    }
}
