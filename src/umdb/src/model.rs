//! Records of the exported document.
//!
//! Each struct is both a protobuf message (field tags are part of the client
//! contract and must not be renumbered) and a serde type whose JSON keys are
//! the protobuf field names. Field declaration order is the JSON key order.

use serde::{Deserialize, Serialize};

/// Root document produced by one export run
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct UmDatabase {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(message, repeated, tag = "2")]
    pub chara: Vec<Chara>,
    #[prost(message, repeated, tag = "3")]
    pub card: Vec<Card>,
    #[prost(message, repeated, tag = "4")]
    pub support_card: Vec<SupportCard>,
    #[prost(message, repeated, tag = "5")]
    pub succession_relation: Vec<SuccessionRelation>,
    #[prost(message, repeated, tag = "6")]
    pub race_instance: Vec<RaceInstance>,
    #[prost(message, repeated, tag = "7")]
    pub wins_saddle: Vec<WinsSaddle>,
    #[prost(message, repeated, tag = "8")]
    pub special_case_race: Vec<SpecialCaseRace>,
    #[prost(message, repeated, tag = "9")]
    pub skill: Vec<Skill>,
    #[prost(message, repeated, tag = "10")]
    pub team_stadium_score_bonus: Vec<TeamStadiumScoreBonus>,
    #[prost(message, repeated, tag = "11")]
    pub story: Vec<Story>,
    #[prost(message, repeated, tag = "12")]
    pub live_song: Vec<LiveSong>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Chara {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub cast_name: String,
    /// `data:image/png;base64,...`, or empty when no icon was found
    #[prost(string, tag = "4")]
    pub icon_url: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportCard {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int32, tag = "3")]
    pub chara_id: i32,
    #[prost(int32, tag = "4")]
    pub command_id: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessionRelation {
    #[prost(int32, tag = "1")]
    pub relation_type: i32,
    #[prost(int32, tag = "2")]
    pub relation_point: i32,
    #[prost(message, repeated, tag = "3")]
    pub member: Vec<SuccessionMember>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessionMember {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(int32, tag = "2")]
    pub chara_id: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceInstance {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int32, tag = "3")]
    pub distance: i32,
    #[prost(int32, tag = "4")]
    pub ground_type: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct WinsSaddle {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int32, repeated, tag = "3")]
    pub race_instance_id: Vec<i32>,
    #[prost(int32, tag = "4")]
    pub priority: i32,
    #[prost(int32, tag = "5")]
    pub group_id: i32,
    #[prost(int32, tag = "6")]
    pub r#type: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialCaseRace {
    #[prost(int32, tag = "1")]
    pub race_instance_id: i32,
    #[prost(int32, tag = "2")]
    pub program_group: i32,
    #[prost(int32, tag = "3")]
    pub race_permission: i32,
    #[prost(int32, repeated, tag = "4")]
    pub chara_id: Vec<i32>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(int32, tag = "3")]
    pub grade_value: i32,
    #[prost(string, repeated, tag = "4")]
    pub tag_id: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStadiumScoreBonus {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Story {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveSong {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub square_title: String,
    #[prost(string, tag = "3")]
    pub square_content: String,
    #[prost(int32, tag = "4")]
    pub master_bonus_id: i32,
    #[prost(int32, tag = "5")]
    pub square_type: i32,
    /// Parallel to `perf_value`; always the same length
    #[prost(int32, repeated, tag = "6")]
    pub perf_type: Vec<i32>,
    #[prost(int32, repeated, tag = "7")]
    pub perf_value: Vec<i32>,
    #[prost(string, tag = "8")]
    pub live_show_context: String,
}

impl LiveSong {
    /// Performance (type, value) pairs in column order
    pub fn perf_pairs(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.perf_type
            .iter()
            .copied()
            .zip(self.perf_value.iter().copied())
    }

    pub(crate) fn push_perf(&mut self, perf_type: i32, perf_value: i32) {
        self.perf_type.push(perf_type);
        self.perf_value.push(perf_value);
    }
}

/// Shared shape of the single-category label records
pub trait TextLabel {
    fn new_label(id: i32, name: String) -> Self;
}

impl TextLabel for Card {
    fn new_label(id: i32, name: String) -> Self {
        Self { id, name }
    }
}

impl TextLabel for TeamStadiumScoreBonus {
    fn new_label(id: i32, name: String) -> Self {
        Self { id, name }
    }
}

impl TextLabel for Story {
    fn new_label(id: i32, name: String) -> Self {
        Self { id, name }
    }
}
