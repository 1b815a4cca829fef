//! 同伴评审结果聚合
//!
//! 每当任一评审记录离开 pending 状态时触发。重新拉取该任务
//! 的全部评审记录：仍有 pending 则不动；全部出结果后，
//! 任一 rejected 即判定 rejected，否则进入教务终审。

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::models::assignments::entities::{AssignmentStatus, aggregate_peer_verdicts};
use crate::services::notifications::notify::{notify, notify_staff};
use crate::storage::Storage;

/// 对指定任务执行一轮聚合
pub async fn run_peer_aggregation(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> Result<()> {
    let Some(assignment) = storage.get_assignment_by_id(assignment_id).await? else {
        return Ok(());
    };

    // 只有 pending 中的任务参与聚合
    if assignment.status != AssignmentStatus::Pending {
        return Ok(());
    }

    let evaluations = storage.list_evaluations_by_assignment(assignment_id).await?;
    let statuses: Vec<_> = evaluations.iter().map(|e| e.status).collect();

    let Some(next_status) = aggregate_peer_verdicts(&statuses) else {
        // 仍有评审未出结果
        return Ok(());
    };

    // 条件迁移：并发聚合时只有一个会生效
    let moved = storage
        .update_assignment_status_checked(assignment_id, AssignmentStatus::Pending, next_status)
        .await?;

    if !moved {
        return Ok(());
    }

    let template_title = storage
        .get_template_by_id(assignment.template_id)
        .await?
        .map(|t| t.title)
        .unwrap_or_default();

    match next_status {
        AssignmentStatus::Rejected => {
            info!(
                "Assignment {} rejected by peer evaluation",
                assignment_id
            );
            notify(
                storage,
                assignment.student_id,
                "assignment_rejected",
                "同伴评审未通过",
                format!(
                    "你的项目「{template_title}」未通过同伴评审，请联系教务安排重做"
                ),
                Some("assignment"),
                Some(assignment_id),
            )
            .await;
        }
        AssignmentStatus::AwaitingStaffReview => {
            info!(
                "Assignment {} passed peer evaluation, awaiting staff review",
                assignment_id
            );
            notify(
                storage,
                assignment.student_id,
                "peer_review_completed",
                "同伴评审已通过",
                format!("你的项目「{template_title}」已通过同伴评审，等待教务终审"),
                Some("assignment"),
                Some(assignment_id),
            )
            .await;
            notify_staff(
                storage,
                "staff_review_requested",
                "项目等待终审",
                format!("项目「{template_title}」已通过同伴评审，请安排终审"),
                Some("assignment"),
                Some(assignment_id),
            )
            .await;
        }
        _ => {}
    }

    Ok(())
}
