//! 未预约时段的过期清理
//!
//! 起始时间距当前不足 30 分钟的未预约时段一律删除，
//! 防止最后一刻的不可靠承诺。由后台任务周期调用，
//! 也可直接调用（幂等：删除是终态，重复执行无副作用）。

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::models::slots::entities::SLOT_EXPIRY_LEAD_MINUTES;
use crate::services::notifications::notify::notify;
use crate::storage::Storage;

/// 清理一轮过期时段，返回删除数量
pub async fn expire_unbooked_slots(storage: &Arc<dyn Storage>) -> Result<u64> {
    let cutoff = (chrono::Utc::now() + chrono::Duration::minutes(SLOT_EXPIRY_LEAD_MINUTES))
        .timestamp();

    let expired = storage.expire_unbooked_slots_before(cutoff).await?;
    let count = expired.len() as u64;

    for slot in expired {
        info!(
            "Expired unbooked slot {} of evaluator {} (start {})",
            slot.id,
            slot.evaluator_id,
            slot.start_at.to_rfc3339()
        );
        notify(
            storage,
            slot.evaluator_id,
            "slot_expired",
            "时段已过期",
            format!(
                "你提供的评审时段（{}）因临近开始仍未被预约，已自动删除",
                slot.start_at.to_rfc3339()
            ),
            Some("slot"),
            Some(slot.id),
        )
        .await;
    }

    Ok(count)
}
