use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 项目规模，决定通过后奖励的天数
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub enum TemplateSize {
    Short,
    Medium,
    Long,
}

impl TemplateSize {
    /// 通过该规模项目后奖励的剩余天数
    pub fn bonus_days(&self) -> i32 {
        match self {
            TemplateSize::Short => 1,
            TemplateSize::Medium => 2,
            TemplateSize::Long => 3,
        }
    }
}

impl<'de> Deserialize<'de> for TemplateSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "short" => Ok(TemplateSize::Short),
            "medium" => Ok(TemplateSize::Medium),
            "long" => Ok(TemplateSize::Long),
            _ => Err(serde::de::Error::custom(format!(
                "无效的项目规模: '{s}'. 支持的规模: short, medium, long"
            ))),
        }
    }
}

impl std::fmt::Display for TemplateSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSize::Short => write!(f, "short"),
            TemplateSize::Medium => write!(f, "medium"),
            TemplateSize::Long => write!(f, "long"),
        }
    }
}

impl std::str::FromStr for TemplateSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(TemplateSize::Short),
            "medium" => Ok(TemplateSize::Medium),
            "long" => Ok(TemplateSize::Long),
            _ => Err(format!("Invalid template size: {s}")),
        }
    }
}

// 项目模板实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/template.ts")]
pub struct ProjectTemplate {
    pub id: i64,
    pub title: String,
    pub description: String,
    // 有序的目标/规格/练习/资源链接列表
    pub objectives: Vec<String>,
    pub specifications: Vec<String>,
    pub exercises: Vec<String>,
    pub resource_links: Vec<String>,
    pub demo_video_url: Option<String>,
    pub size: TemplateSize,
    // 培养路线中的顺序，每个顺序值只能有一个模板
    pub sequence_order: i32,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_days_by_size() {
        assert_eq!(TemplateSize::Short.bonus_days(), 1);
        assert_eq!(TemplateSize::Medium.bonus_days(), 2);
        assert_eq!(TemplateSize::Long.bonus_days(), 3);
    }

    #[test]
    fn test_size_round_trip() {
        for s in ["short", "medium", "long"] {
            let size: TemplateSize = s.parse().unwrap();
            assert_eq!(size.to_string(), s);
        }
        assert!("huge".parse::<TemplateSize>().is_err());
    }
}
