use super::{ExtractContext, Extractor};
use crate::db::{category, placeholders, MasterDb};
use crate::error::Result;
use crate::model::{RaceInstance, SpecialCaseRace, UmDatabase, WinsSaddle};
use std::collections::{HashMap, HashSet};

/// Name given to race instances without localized text
pub const UNKNOWN_RACE_NAME: &str = "Unknown";

/// Number of `race_instance_id_N` columns on a wins saddle row
const WINS_SADDLE_SLOTS: usize = 8;

pub struct RaceInstanceExtractor;

const RACE_INSTANCE_SQL: &str = r#"
    SELECT ri.id, rcs.distance, rcs.ground, t.text
    FROM race_instance AS ri
    LEFT JOIN race AS r ON ri.race_id = r.id
    LEFT JOIN race_course_set AS rcs ON r.course_set = rcs.id
    LEFT JOIN text_data AS t ON t."index" = ri.id AND t.category = ?1
"#;

impl Extractor for RaceInstanceExtractor {
    fn name(&self) -> &'static str {
        "race_instance"
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let rows = db.query(
            self.name(),
            RACE_INSTANCE_SQL,
            [category::RACE_INSTANCE_NAME],
            |row| {
                let name = row
                    .get::<_, Option<String>>(3)?
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNKNOWN_RACE_NAME.to_string());
                Ok(RaceInstance {
                    id: row.get(0)?,
                    name,
                    distance: row.get::<_, Option<i32>>(1)?.unwrap_or_default(),
                    ground_type: row.get::<_, Option<i32>>(2)?.unwrap_or_default(),
                })
            },
        )?;
        doc.race_instance.extend(rows);
        Ok(())
    }
}

pub struct WinsSaddleExtractor;

const WINS_SADDLE_SQL: &str = r#"
    SELECT s.id, t.text, s.priority, s.group_id, s.win_saddle_type,
           s.race_instance_id_1, s.race_instance_id_2, s.race_instance_id_3,
           s.race_instance_id_4, s.race_instance_id_5, s.race_instance_id_6,
           s.race_instance_id_7, s.race_instance_id_8
    FROM single_mode_wins_saddle AS s
    JOIN text_data AS t ON t.category = ?1 AND s.id = t."index"
"#;

/// Keep the positive instance ids, in slot order
fn retained_instance_ids(slots: impl IntoIterator<Item = Option<i32>>) -> Vec<i32> {
    slots.into_iter().flatten().filter(|&id| id > 0).collect()
}

impl Extractor for WinsSaddleExtractor {
    fn name(&self) -> &'static str {
        "wins_saddle"
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let rows = db.query(
            self.name(),
            WINS_SADDLE_SQL,
            [category::WINS_SADDLE_NAME],
            |row| {
                let slots = (0..WINS_SADDLE_SLOTS)
                    .map(|i| row.get::<_, Option<i32>>(5 + i))
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(WinsSaddle {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    race_instance_id: retained_instance_ids(slots),
                    priority: row.get(2)?,
                    group_id: row.get(3)?,
                    r#type: row.get(4)?,
                })
            },
        )?;
        doc.wins_saddle.extend(rows);
        Ok(())
    }
}

/// Races a character may only run through an override program.
///
/// An override program points at a base program but schedules a different
/// race instance. Headers are collected first, eligibility is resolved per
/// program group with one follow-up query, and only headers whose group has
/// at least one eligible character are emitted.
pub struct SpecialCaseRaceExtractor;

const OVERRIDE_PROGRAM_SQL: &str = r#"
    SELECT p1.race_instance_id, p1.program_group, p1.race_permission
    FROM single_mode_program AS p1
    INNER JOIN single_mode_program AS p2
        ON p1.base_program_id != 0 AND p2.base_program_id = 0
        AND p1.base_program_id = p2.id
        AND p1.race_instance_id != p2.race_instance_id
"#;

/// Headers discovered in the first phase plus the groups they need resolved
#[derive(Debug, Default)]
struct Candidates {
    headers: Vec<SpecialCaseRace>,
    groups: Vec<i32>,
}

impl Candidates {
    fn collect(headers: Vec<SpecialCaseRace>) -> Self {
        let mut seen = HashSet::new();
        let groups = headers
            .iter()
            .map(|h| h.program_group)
            .filter(|g| seen.insert(*g))
            .collect();
        Self { headers, groups }
    }
}

fn eligible_charas(db: &MasterDb, groups: &[i32]) -> Result<HashMap<i32, Vec<i32>>> {
    let mut by_group: HashMap<i32, Vec<i32>> = HashMap::new();
    if groups.is_empty() {
        return Ok(by_group);
    }

    let sql = format!(
        "SELECT chara_id, program_group FROM single_mode_chara_program WHERE program_group IN ({})",
        placeholders(groups.len())
    );
    let rows = db.query(
        "special_case_race eligibility",
        &sql,
        rusqlite::params_from_iter(groups.iter()),
        |row| Ok((row.get::<_, i32>(0)?, row.get::<_, i32>(1)?)),
    )?;
    for (chara_id, group) in rows {
        by_group.entry(group).or_default().push(chara_id);
    }
    Ok(by_group)
}

/// Attach eligible characters and drop headers whose group resolved to none
fn resolve(candidates: Candidates, by_group: &HashMap<i32, Vec<i32>>) -> Vec<SpecialCaseRace> {
    candidates
        .headers
        .into_iter()
        .filter_map(|mut race| {
            let charas = by_group.get(&race.program_group)?;
            if charas.is_empty() {
                return None;
            }
            race.chara_id = charas.clone();
            Some(race)
        })
        .collect()
}

impl Extractor for SpecialCaseRaceExtractor {
    fn name(&self) -> &'static str {
        "special_case_race"
    }

    fn extract(&self, db: &MasterDb, _ctx: &ExtractContext, doc: &mut UmDatabase) -> Result<()> {
        let headers = db.query(self.name(), OVERRIDE_PROGRAM_SQL, [], |row| {
            Ok(SpecialCaseRace {
                race_instance_id: row.get(0)?,
                program_group: row.get(1)?,
                race_permission: row.get(2)?,
                chara_id: Vec::new(),
            })
        })?;
        let candidates = Candidates::collect(headers);
        let candidate_count = candidates.headers.len();

        let by_group = eligible_charas(db, &candidates.groups)?;
        let races = resolve(candidates, &by_group);

        tracing::debug!(
            candidates = candidate_count,
            emitted = races.len(),
            "resolved special case races"
        );
        doc.special_case_race.extend(races);
        Ok(())
    }
}
