use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 同一学员同一项目两次预约之间的最小间隔（分钟）
pub const MIN_SLOT_SPACING_MINUTES: i64 = 45;

/// 未预约时段的自动清理提前量（分钟）
pub const SLOT_EXPIRY_LEAD_MINUTES: i64 = 30;

// 评审可用时段实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/slot.ts")]
pub struct AvailabilitySlot {
    pub id: i64,
    pub evaluator_id: i64,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
    pub booked: bool,
    pub booked_by: Option<i64>,
    pub project_id: Option<i64>,
    pub assignment_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AvailabilitySlot {
    /// 与另一时段是否重叠（同一评审人不允许重叠时段）
    pub fn overlaps(&self, start: chrono::DateTime<chrono::Utc>, end: chrono::DateTime<chrono::Utc>) -> bool {
        self.start_at < end && self.end_at > start
    }

    /// 与另一时段的起始间隔是否满足最小间隔要求
    pub fn spaced_from(&self, other_start: chrono::DateTime<chrono::Utc>) -> bool {
        (self.start_at - other_start).num_minutes().abs() >= MIN_SLOT_SPACING_MINUTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn slot(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> AvailabilitySlot {
        AvailabilitySlot {
            id: 1,
            evaluator_id: 10,
            start_at: Utc.with_ymd_and_hms(2026, 8, 4, start_h, start_m, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2026, 8, 4, end_h, end_m, 0).unwrap(),
            booked: false,
            booked_by: None,
            project_id: None,
            assignment_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_overlap_detection() {
        let s = slot(10, 0, 10, 45);
        // 部分重叠
        assert!(s.overlaps(
            Utc.with_ymd_and_hms(2026, 8, 4, 10, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, 4, 11, 15, 0).unwrap()
        ));
        // 完全相同
        assert!(s.overlaps(s.start_at, s.end_at));
        // 首尾相接不算重叠
        assert!(!s.overlaps(
            Utc.with_ymd_and_hms(2026, 8, 4, 10, 45, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 8, 4, 11, 30, 0).unwrap()
        ));
    }

    #[test]
    fn test_spacing_rule() {
        let s = slot(10, 0, 10, 45);
        // 60 分钟间隔满足
        assert!(s.spaced_from(Utc.with_ymd_and_hms(2026, 8, 4, 11, 0, 0).unwrap()));
        // 44 分钟不满足
        assert!(!s.spaced_from(Utc.with_ymd_and_hms(2026, 8, 4, 10, 44, 0).unwrap()));
        // 恰好 45 分钟满足
        assert!(s.spaced_from(Utc.with_ymd_and_hms(2026, 8, 4, 10, 45, 0).unwrap()));
        // 方向无关
        assert!(s.spaced_from(Utc.with_ymd_and_hms(2026, 8, 4, 9, 15, 0).unwrap()));
    }
}
