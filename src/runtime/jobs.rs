//! 后台周期任务
//!
//! 所有任务都跑在 tokio interval 上，由 main 在启动后 spawn。
//! 入口函数独立可调用（也方便直接触发一轮），重复执行安全。

use std::sync::Arc;

use tokio::time::{Duration, interval};
use tracing::{debug, warn};

use crate::services::slots::expire::expire_unbooked_slots;
use crate::storage::Storage;

/// 时段过期清理间隔（秒）
const SLOT_EXPIRY_INTERVAL_SECS: u64 = 60;

/// 剩余天数递减间隔（秒），每日一次
const DAY_DECREMENT_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// 时段过期清理：每分钟一轮
///
/// 删除起始时间距当前不足 30 分钟的未预约时段并通知评审人。
pub async fn run_slot_expiry_sweeper(storage: Arc<dyn Storage>) {
    let mut ticker = interval(Duration::from_secs(SLOT_EXPIRY_INTERVAL_SECS));
    loop {
        ticker.tick().await;

        match expire_unbooked_slots(&storage).await {
            Ok(0) => {}
            Ok(count) => {
                debug!("Slot expiry sweep removed {} stale slot(s)", count);
            }
            Err(e) => {
                warn!("Slot expiry sweep failed: {}", e);
            }
        }
    }
}

/// 剩余天数递减：每日一轮
///
/// 在读学员的剩余天数减一，归零的账号转为封禁。
pub async fn run_day_decrement_job(storage: Arc<dyn Storage>) {
    let mut ticker = interval(Duration::from_secs(DAY_DECREMENT_INTERVAL_SECS));
    // 第一个 tick 立即完成，跳过以免启动即扣减
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match storage.decrement_days_remaining_all().await {
            Ok(count) => {
                debug!("Day decrement job updated {} account(s)", count);
            }
            Err(e) => {
                warn!("Day decrement job failed: {}", e);
            }
        }
    }
}

/// 启动全部后台任务
pub fn spawn_background_jobs(storage: Arc<dyn Storage>) {
    tokio::spawn(run_slot_expiry_sweeper(storage.clone()));
    tokio::spawn(run_day_decrement_job(storage));
}
