use super::{ExtractContext, Extractor};
use crate::db::{category, MasterDb};
use crate::error::Result;
use crate::model::{Card, Story, TeamStadiumScoreBonus, TextLabel, UmDatabase};

/// `(index, text)` pairs of a single `text_data` category
pub struct TextCategoryExtractor<T> {
    name: &'static str,
    category: i32,
    collection: fn(&mut UmDatabase) -> &mut Vec<T>,
}

const TEXT_SQL: &str = r#"SELECT "index", text FROM text_data WHERE category = ?1"#;

impl TextCategoryExtractor<Card> {
    pub fn cards() -> Self {
        Self {
            name: "card",
            category: category::CARD_NAME,
            collection: |doc| &mut doc.card,
        }
    }
}

impl TextCategoryExtractor<TeamStadiumScoreBonus> {
    pub fn team_stadium_score_bonuses() -> Self {
        Self {
            name: "team_stadium_score_bonus",
            category: category::TEAM_STADIUM_SCORE_BONUS,
            collection: |doc| &mut doc.team_stadium_score_bonus,
        }
    }
}

impl TextCategoryExtractor<Story> {
    pub fn stories() -> Self {
        Self {
            name: "story",
            category: category::STORY_NAME,
            collection: |doc| &mut doc.story,
        }
    }
}

impl<T: TextLabel> Extractor for TextCategoryExtractor<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let rows = db.query(self.name, TEXT_SQL, [self.category], |row| {
            Ok(T::new_label(row.get(0)?, row.get(1)?))
        })?;
        (self.collection)(doc).extend(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_support::run;
    use crate::testing::fixture_db_with;

    const LABELS: &str = r#"
        INSERT INTO text_data (category, "index", text) VALUES
            (5, 100101, '[スペシャルドリーマー]'),
            (5, 100102, '[ほっとはーと]'),
            (148, 1, 'Score bonus'),
            (181, 501001001, 'Story one'),
            (181, 801001001, 'Story two');
    "#;

    #[test]
    fn test_cards_by_category() {
        let db = fixture_db_with(LABELS);
        let doc = run(&TextCategoryExtractor::cards(), &db);

        assert_eq!(doc.card.len(), 2);
        assert_eq!(doc.card[0].id, 100101);
        assert_eq!(doc.card[0].name, "[スペシャルドリーマー]");
        assert!(doc.story.is_empty());
    }

    #[test]
    fn test_score_bonus_and_story_collections() {
        let db = fixture_db_with(LABELS);

        let doc = run(&TextCategoryExtractor::team_stadium_score_bonuses(), &db);
        assert_eq!(doc.team_stadium_score_bonus.len(), 1);
        assert_eq!(doc.team_stadium_score_bonus[0].name, "Score bonus");

        let doc = run(&TextCategoryExtractor::stories(), &db);
        let ids: Vec<_> = doc.story.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![501001001, 801001001]);
    }
}
