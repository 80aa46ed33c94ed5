//! Follow-up cadence rules.
//!
//! The cadence is three outreach attempts with fixed day offsets: the first
//! one day after delivery, the second six days after the first completes,
//! the third fourteen days after the second completes. After stage three
//! completes the cadence is exhausted. All arithmetic is exact calendar-day
//! addition in UTC.
//!
//! These functions are pure; the persistence layer applies their decisions
//! inside a single transaction.

use chrono::{DateTime, Duration, Utc};

/// Highest cadence stage. A customer's stage never exceeds this.
pub const FINAL_STAGE: i32 = 3;

/// Days between delivery and the first follow-up.
const FIRST_STAGE_OFFSET_DAYS: i64 = 1;

/// Days between completing a stage and the next stage's due date.
/// Only stages 2 and 3 are ever scheduled through this table.
fn offset_days(stage: i32) -> Option<i64> {
    match stage {
        2 => Some(6),
        3 => Some(14),
        _ => None,
    }
}

/// Due date of the stage-1 follow-up created at customer intake.
pub fn first_due_date(delivery_date: DateTime<Utc>) -> DateTime<Utc> {
    delivery_date + Duration::days(FIRST_STAGE_OFFSET_DAYS)
}

/// What happens after a follow-up completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceStep {
    /// Schedule the next stage with this due date.
    Schedule {
        stage: i32,
        due_date: DateTime<Utc>,
    },
    /// No further outreach; the cadence is exhausted.
    Exhausted,
}

/// Decides the next cadence step after completing the follow-up at
/// `completed_stage`. The successor stage is derived from the completed
/// attempt itself, not from separately tracked customer state.
pub fn advance(completed_stage: i32, completed_at: DateTime<Utc>) -> CadenceStep {
    let next = completed_stage + 1;

    match offset_days(next) {
        Some(days) if next <= FINAL_STAGE => CadenceStep::Schedule {
            stage: next,
            due_date: completed_at + Duration::days(days),
        },
        _ => CadenceStep::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_due_date_is_delivery_plus_one_day() {
        let delivery = date(2024, 1, 1);
        assert_eq!(first_due_date(delivery), date(2024, 1, 2));
    }

    #[test]
    fn test_completing_stage_one_schedules_stage_two_plus_six_days() {
        let completed_at = date(2024, 1, 10);
        assert_eq!(
            advance(1, completed_at),
            CadenceStep::Schedule {
                stage: 2,
                due_date: date(2024, 1, 16),
            }
        );
    }

    #[test]
    fn test_completing_stage_two_schedules_stage_three_plus_fourteen_days() {
        let completed_at = date(2024, 2, 1);
        assert_eq!(
            advance(2, completed_at),
            CadenceStep::Schedule {
                stage: 3,
                due_date: date(2024, 2, 15),
            }
        );
    }

    #[test]
    fn test_completing_final_stage_exhausts_cadence() {
        assert_eq!(advance(FINAL_STAGE, Utc::now()), CadenceStep::Exhausted);
    }

    #[test]
    fn test_out_of_range_stage_exhausts() {
        // Defensive: stage values outside 1..=3 never schedule anything.
        assert_eq!(advance(4, Utc::now()), CadenceStep::Exhausted);
        assert_eq!(advance(17, Utc::now()), CadenceStep::Exhausted);
    }

    #[test]
    fn test_scheduled_stage_never_exceeds_final() {
        for stage in 1..=FINAL_STAGE {
            if let CadenceStep::Schedule { stage: next, .. } = advance(stage, Utc::now()) {
                assert!(next <= FINAL_STAGE);
                assert_eq!(next, stage + 1);
            }
        }
    }

    #[test]
    fn test_offsets_preserve_time_of_day() {
        let completed_at = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 45).unwrap();
        if let CadenceStep::Schedule { due_date, .. } = advance(1, completed_at) {
            assert_eq!(due_date.time(), completed_at.time());
        } else {
            panic!("expected a scheduled stage");
        }
    }
}
