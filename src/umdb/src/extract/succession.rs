use super::{ExtractContext, Extractor};
use crate::db::MasterDb;
use crate::error::{ExportError, Result};
use crate::model::{SuccessionMember, SuccessionRelation, UmDatabase};
use std::collections::HashMap;

/// Succession relations with their members grouped under each relation type
pub struct SuccessionRelationExtractor;

const RELATION_SQL: &str = "SELECT relation_type, relation_point FROM succession_relation";

const MEMBER_SQL: &str =
    "SELECT id, relation_type, chara_id FROM succession_relation_member ORDER BY id";

/// Relations keyed by type, kept in header row order until finalized
#[derive(Default)]
struct RelationBuilder {
    relations: Vec<SuccessionRelation>,
    by_type: HashMap<i32, usize>,
}

impl RelationBuilder {
    fn add_header(&mut self, relation_type: i32, relation_point: i32) {
        let header = SuccessionRelation {
            relation_type,
            relation_point,
            member: Vec::new(),
        };
        // A repeated type replaces the earlier header but keeps its position
        match self.by_type.get(&relation_type) {
            Some(&i) => self.relations[i] = header,
            None => {
                self.by_type.insert(relation_type, self.relations.len());
                self.relations.push(header);
            }
        }
    }

    fn add_member(&mut self, relation_type: i32, member: SuccessionMember) -> Result<()> {
        let Some(&i) = self.by_type.get(&relation_type) else {
            return Err(ExportError::OrphanRelationMember {
                member_id: member.id,
                relation_type,
            });
        };
        self.relations[i].member.push(member);
        Ok(())
    }

    fn finish(self) -> Vec<SuccessionRelation> {
        self.relations
    }
}

impl Extractor for SuccessionRelationExtractor {
    fn name(&self) -> &'static str {
        "succession_relation"
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let mut builder = RelationBuilder::default();

        let headers = db.query(self.name(), RELATION_SQL, [], |row| {
            Ok((row.get::<_, i32>(0)?, row.get::<_, i32>(1)?))
        })?;
        for (relation_type, relation_point) in headers {
            builder.add_header(relation_type, relation_point);
        }

        let members = db.query(self.name(), MEMBER_SQL, [], |row| {
            let member = SuccessionMember {
                id: row.get(0)?,
                chara_id: row.get(2)?,
            };
            Ok((row.get::<_, i32>(1)?, member))
        })?;
        let member_count = members.len();
        for (relation_type, member) in members {
            builder.add_member(relation_type, member)?;
        }

        let relations = builder.finish();
        tracing::debug!(
            relations = relations.len(),
            members = member_count,
            "grouped succession members"
        );
        doc.succession_relation.extend(relations);
        Ok(())
    }
}
