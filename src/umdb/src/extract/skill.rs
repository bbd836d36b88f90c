use super::{ExtractContext, Extractor};
use crate::db::{category, MasterDb};
use crate::error::Result;
use crate::model::{Skill, UmDatabase};

pub struct SkillExtractor;

const SKILL_SQL: &str = r#"
    SELECT s.id, t.text, s.grade_value, s.tag_id
    FROM skill_data AS s
    JOIN text_data AS t ON t."index" = s.id AND t.category = ?1
"#;

/// Tag tokens of a `/`-delimited tag field. Empty segments are kept.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split('/').map(str::to_string).collect()
}

impl Extractor for SkillExtractor {
    fn name(&self) -> &'static str {
        "skill"
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let rows = db.query(self.name(), SKILL_SQL, [category::SKILL_NAME], |row| {
            let tag_id = row
                .get::<_, Option<String>>(3)?
                .map(|tags| split_tags(&tags))
                .unwrap_or_default();
            Ok(Skill {
                id: row.get(0)?,
                name: row.get(1)?,
                grade_value: row.get(2)?,
                tag_id,
            })
        })?;
        doc.skill.extend(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_support::run;
    use crate::testing::fixture_db_with;

    #[test]
    fn test_split_tags_keeps_empty_segments() {
        assert_eq!(split_tags("a/b/"), vec!["a", "b", ""]);
        assert_eq!(split_tags("/a//b"), vec!["", "a", "", "b"]);
        assert_eq!(split_tags("101"), vec!["101"]);
        assert_eq!(split_tags(""), vec![""]);
    }

    #[test]
    fn test_skills_with_tags() {
        let db = fixture_db_with(
            r#"
            INSERT INTO skill_data (id, grade_value, tag_id) VALUES
                (200011, 217, '101/203/'), (200012, 174, NULL), (200013, 0, '401');
            INSERT INTO text_data (category, "index", text) VALUES
                (47, 200011, '右回り◎'), (47, 200012, '左回り○');
            "#,
        );
        let doc = run(&SkillExtractor, &db);

        assert_eq!(doc.skill.len(), 2);
        let first = &doc.skill[0];
        assert_eq!((first.id, first.name.as_str(), first.grade_value), (200011, "右回り◎", 217));
        assert_eq!(first.tag_id, vec!["101", "203", ""]);
        assert!(doc.skill[1].tag_id.is_empty());
    }
}
