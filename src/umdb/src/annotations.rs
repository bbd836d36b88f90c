//! Hand-curated live square annotations.
//!
//! The snapshot carries no text for these bonuses, so the client shows the
//! strings below next to the matching squares.

use phf::phf_map;

static LIVE_SHOW_CONTEXT: phf::Map<i32, &'static str> = phf_map! {
    40000i32 => "擅长率 +5",
    40001i32 => "友情加成 +5%",
    40002i32 => "友情加成 +5%",
    40003i32 => "友情加成 +5%",
    40004i32 => "支援卡事件 +1",
    40005i32 => "支援卡事件 +1",
    40006i32 => "支援卡事件 +1",
    40007i32 => "擅长率 +5",
    40008i32 => "擅长率 +5",
    40009i32 => "支援卡事件 +1",
    40010i32 => "支援卡事件 +1",
    40011i32 => "擅长率 +5",
    40012i32 => "友情加成 +5%",
    40013i32 => "擅长率 +5",
    40014i32 => "友情加成 +5%",
    40015i32 => "友情加成 +5%",
    40016i32 => "友情加成 +5%",
    40017i32 => "擅长率 +5",
    40018i32 => "友情加成 +10%",
    40019i32 => "友情加成 +10%",
    40020i32 => "支援卡事件 +1",
};

/// Annotation for a live square, if one is curated
pub fn live_show_context(square_id: i32) -> Option<&'static str> {
    LIVE_SHOW_CONTEXT.get(&square_id).copied()
}
