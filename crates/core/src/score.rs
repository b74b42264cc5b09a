//! The deduction-based scoring model.

use crate::issue::IssueLog;

/// Perfect score before any deductions.
pub const BASE_SCORE: u32 = 100;

/// Folds the issue log into the final score: 100 minus every deduction,
/// clamped to the [0, 100] range.
pub fn final_score(log: &IssueLog) -> u32 {
    BASE_SCORE.saturating_sub(log.total_deduction()).min(BASE_SCORE)
}
