use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评审状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum EvaluationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl<'de> Deserialize<'de> for EvaluationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EvaluationStatus::Pending => "pending",
            EvaluationStatus::Accepted => "accepted",
            EvaluationStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EvaluationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EvaluationStatus::Pending),
            "accepted" => Ok(EvaluationStatus::Accepted),
            "rejected" => Ok(EvaluationStatus::Rejected),
            _ => Err(format!("Invalid evaluation status: {s}")),
        }
    }
}

// 结构化评审反馈，五个必填维度
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationFeedback {
    pub assiduity: Option<String>,
    pub comprehension: Option<String>,
    pub spec_adherence: Option<String>,
    pub concept_mastery: Option<String>,
    pub explanation: Option<String>,
}

impl EvaluationFeedback {
    /// 五个维度是否全部填写（accepted 结论要求完整反馈）
    pub fn is_complete(&self) -> bool {
        [
            &self.assiduity,
            &self.comprehension,
            &self.spec_adherence,
            &self.concept_mastery,
            &self.explanation,
        ]
        .iter()
        .all(|f| f.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

// 评审记录实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub assignment_id: i64,
    // 被评审的学员
    pub student_id: i64,
    // 评审人
    pub evaluator_id: i64,
    // 预约使用的时段
    pub slot_id: i64,
    pub status: EvaluationStatus,
    pub feedback: EvaluationFeedback,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_feedback() -> EvaluationFeedback {
        EvaluationFeedback {
            assiduity: Some("présent et ponctuel".into()),
            comprehension: Some("bonne".into()),
            spec_adherence: Some("conforme".into()),
            concept_mastery: Some("solide".into()),
            explanation: Some("claire".into()),
        }
    }

    #[test]
    fn test_complete_feedback() {
        assert!(full_feedback().is_complete());
    }

    #[test]
    fn test_missing_field_is_incomplete() {
        let mut fb = full_feedback();
        fb.concept_mastery = None;
        assert!(!fb.is_complete());
    }

    #[test]
    fn test_blank_field_is_incomplete() {
        let mut fb = full_feedback();
        fb.explanation = Some("   ".into());
        assert!(!fb.is_complete());
    }

    #[test]
    fn test_default_is_incomplete() {
        assert!(!EvaluationFeedback::default().is_complete());
    }
}
