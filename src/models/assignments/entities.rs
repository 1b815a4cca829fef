use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::evaluations::entities::EvaluationStatus;

// 任务状态机
//
// assigned -> pending -> awaiting_staff_review -> approved
//                     \-> rejected（同伴评审否决）
// awaiting_staff_review -> assigned（教务驳回，清空提交重做）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Assigned,
    Pending,
    AwaitingStaffReview,
    Rejected,
    Approved,
}

impl AssignmentStatus {
    /// 学员是否可在当前状态下修改仓库地址
    pub fn can_edit_repo_url(&self) -> bool {
        matches!(self, AssignmentStatus::Assigned | AssignmentStatus::Rejected)
    }

    /// 是否可在当前状态下提交
    pub fn can_submit(&self) -> bool {
        matches!(self, AssignmentStatus::Assigned)
    }

    /// 教务是否可在当前状态下做最终评定
    pub fn can_staff_review(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::AwaitingStaffReview | AssignmentStatus::Rejected
        )
    }
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::AwaitingStaffReview => "awaiting_staff_review",
            AssignmentStatus::Rejected => "rejected",
            AssignmentStatus::Approved => "approved",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(AssignmentStatus::Assigned),
            "pending" => Ok(AssignmentStatus::Pending),
            "awaiting_staff_review" => Ok(AssignmentStatus::AwaitingStaffReview),
            "rejected" => Ok(AssignmentStatus::Rejected),
            "approved" => Ok(AssignmentStatus::Approved),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 任务实体：某个学员对某个项目模板的一次攻关
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub template_id: i64,
    pub student_id: i64,
    pub status: AssignmentStatus,
    pub repo_url: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub staff_validator_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 同伴评审结果聚合
///
/// 任一评审仍为 pending 时不做任何迁移；全部出结果后，
/// 只要有一个 rejected 即判定 rejected，否则进入教务终审。
pub fn aggregate_peer_verdicts(statuses: &[EvaluationStatus]) -> Option<AssignmentStatus> {
    if statuses.iter().any(|s| *s == EvaluationStatus::Pending) {
        return None;
    }
    if statuses.iter().any(|s| *s == EvaluationStatus::Rejected) {
        Some(AssignmentStatus::Rejected)
    } else {
        Some(AssignmentStatus::AwaitingStaffReview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::EvaluationStatus::*;

    #[test]
    fn test_pending_evaluation_blocks_transition() {
        assert_eq!(aggregate_peer_verdicts(&[Pending, Accepted]), None);
        assert_eq!(aggregate_peer_verdicts(&[Accepted, Pending]), None);
        assert_eq!(aggregate_peer_verdicts(&[Pending, Pending]), None);
    }

    #[test]
    fn test_rejection_dominates() {
        assert_eq!(
            aggregate_peer_verdicts(&[Accepted, Rejected]),
            Some(AssignmentStatus::Rejected)
        );
        assert_eq!(
            aggregate_peer_verdicts(&[Rejected, Rejected]),
            Some(AssignmentStatus::Rejected)
        );
        // 仍有 pending 时即使已有 rejected 也不迁移
        assert_eq!(aggregate_peer_verdicts(&[Rejected, Pending]), None);
    }

    #[test]
    fn test_all_accepted_moves_to_staff_review() {
        assert_eq!(
            aggregate_peer_verdicts(&[Accepted, Accepted]),
            Some(AssignmentStatus::AwaitingStaffReview)
        );
    }

    #[test]
    fn test_status_round_trip() {
        for s in [
            "assigned",
            "pending",
            "awaiting_staff_review",
            "rejected",
            "approved",
        ] {
            let status: AssignmentStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_state_gates() {
        assert!(AssignmentStatus::Assigned.can_submit());
        assert!(!AssignmentStatus::Pending.can_submit());
        assert!(!AssignmentStatus::Rejected.can_submit());

        assert!(AssignmentStatus::Assigned.can_edit_repo_url());
        assert!(AssignmentStatus::Rejected.can_edit_repo_url());
        assert!(!AssignmentStatus::AwaitingStaffReview.can_edit_repo_url());

        assert!(AssignmentStatus::AwaitingStaffReview.can_staff_review());
        assert!(AssignmentStatus::Rejected.can_staff_review());
        assert!(!AssignmentStatus::Pending.can_staff_review());
    }
}
