//! Reward thresholds: XP, levels, agent titles, mastery deltas, badges.
//!
//! All pure functions over counters the caller persists. The engine never
//! touches storage; the host applies these deltas to its own records.

/// XP per answered question.
pub fn xp_for_answer(is_correct: bool) -> u32 {
    if is_correct {
        8
    } else {
        2
    }
}

/// Every 120 XP is one level; levels start at 1.
pub fn level_for_xp(total_xp: u32) -> u32 {
    total_xp / 120 + 1
}

/// Detective-agency rank for a level.
pub fn title_for_level(level: u32) -> &'static str {
    if level >= 5 {
        "王牌探员"
    } else if level >= 4 {
        "高级探员"
    } else if level >= 3 {
        "正式探员"
    } else if level >= 2 {
        "见习探员"
    } else {
        "新手探员"
    }
}

/// Per-knowledge-point mastery adjustment for one answer.
pub fn mastery_delta(is_correct: bool) -> i32 {
    if is_correct {
        20
    } else {
        -25
    }
}

/// Applies a mastery delta, clamped to 0..=100.
pub fn apply_mastery_delta(mastery: u32, delta: i32) -> u32 {
    (mastery as i64 + delta as i64).clamp(0, 100) as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeAward {
    pub badge_id: String,
    pub reason_event: &'static str,
}

/// Inputs for badge evaluation after a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeContext<'a> {
    pub unit_id: &'a str,
    pub passed: bool,
    /// Cumulative failed runs across all units, including this one.
    pub total_fails_all_units: u32,
}

/// Badges earned by this run. The caller deduplicates against already-held
/// badges; this only says which thresholds the run crossed.
pub fn compute_badge_awards(ctx: &BadgeContext<'_>) -> Vec<BadgeAward> {
    let mut awards = Vec::new();

    if ctx.passed {
        awards.push(BadgeAward {
            badge_id: format!("clear_{}", ctx.unit_id),
            reason_event: "RUN_PASSED",
        });
    }

    if ctx.total_fails_all_units >= 10 {
        awards.push(BadgeAward {
            badge_id: "persistence_10fails".to_string(),
            reason_event: "FAILS_TOTAL_10",
        });
    } else if ctx.total_fails_all_units >= 5 {
        awards.push(BadgeAward {
            badge_id: "persistence_5fails".to_string(),
            reason_event: "FAILS_TOTAL_5",
        });
    }

    awards
}
