//! 时段预约校验与预约操作
//!
//! 成对预约（提交流程）与单时段预约（流程外）共用同一套规则。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SlotService;
use crate::models::slots::entities::AvailabilitySlot;
use crate::models::slots::requests::BookSlotRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 成对预约规则的违规种类
#[derive(Debug, Clone, PartialEq)]
pub enum PairRuleViolation {
    /// 必须恰好选择两个不同的时段
    NotExactlyTwo,
    /// 时段已被预约
    AlreadyBooked(i64),
    /// 不允许预约自己提供的时段（禁止自评）
    SelfEvaluation,
    /// 两个时段必须来自不同的评审人
    SameEvaluator,
    /// 两个时段起始间隔不足 45 分钟
    TooClose,
}

impl PairRuleViolation {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            PairRuleViolation::NotExactlyTwo => ErrorCode::SlotPairInvalid,
            PairRuleViolation::AlreadyBooked(_) => ErrorCode::SlotAlreadyBooked,
            PairRuleViolation::SelfEvaluation => ErrorCode::SelfEvaluationForbidden,
            PairRuleViolation::SameEvaluator => ErrorCode::SlotPairInvalid,
            PairRuleViolation::TooClose => ErrorCode::SlotSpacingTooClose,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PairRuleViolation::NotExactlyTwo => "必须恰好选择两个不同的时段".to_string(),
            PairRuleViolation::AlreadyBooked(id) => format!("时段 {id} 已被预约"),
            PairRuleViolation::SelfEvaluation => "不能预约自己提供的时段".to_string(),
            PairRuleViolation::SameEvaluator => "两个时段必须来自不同的评审人".to_string(),
            PairRuleViolation::TooClose => "两个时段的起始时间间隔不得少于 45 分钟".to_string(),
        }
    }

    /// 对应的 HTTP 响应
    pub fn into_response(self) -> HttpResponse {
        let body = ApiResponse::error_empty(self.error_code(), self.message());
        match self {
            PairRuleViolation::AlreadyBooked(_) => HttpResponse::Conflict().json(body),
            PairRuleViolation::SelfEvaluation => HttpResponse::Forbidden().json(body),
            _ => HttpResponse::UnprocessableEntity().json(body),
        }
    }
}

/// 校验一对已解析时段是否可由该学员预约
///
/// 前置条件由调用方保证：ids 已解析且数量在此校验。
pub(crate) fn check_bookable_pair(
    slots: &[AvailabilitySlot],
    student_id: i64,
) -> Result<(), PairRuleViolation> {
    if slots.len() != 2 {
        return Err(PairRuleViolation::NotExactlyTwo);
    }

    for slot in slots {
        if slot.booked {
            return Err(PairRuleViolation::AlreadyBooked(slot.id));
        }
        if slot.evaluator_id == student_id {
            return Err(PairRuleViolation::SelfEvaluation);
        }
    }

    if slots[0].evaluator_id == slots[1].evaluator_id {
        return Err(PairRuleViolation::SameEvaluator);
    }

    if !slots[0].spaced_from(slots[1].start_at) {
        return Err(PairRuleViolation::TooClose);
    }

    Ok(())
}

/// 校验单时段预约：对该学员同一项目的全部已有预约重新检查间隔
pub(crate) fn check_bookable_single(
    slot: &AvailabilitySlot,
    existing_bookings: &[AvailabilitySlot],
    student_id: i64,
) -> Result<(), PairRuleViolation> {
    if slot.booked {
        return Err(PairRuleViolation::AlreadyBooked(slot.id));
    }
    if slot.evaluator_id == student_id {
        return Err(PairRuleViolation::SelfEvaluation);
    }
    for existing in existing_bookings {
        if !slot.spaced_from(existing.start_at) {
            return Err(PairRuleViolation::TooClose);
        }
    }
    Ok(())
}

// 单时段直接预约（提交流程之外）
// POST /availability/book
pub async fn book_single_slot(
    service: &SlotService,
    request: &HttpRequest,
    student_id: i64,
    req: BookSlotRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let slot = match storage.get_slot_by_id(req.slot_id).await {
        Ok(Some(slot)) => slot,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SlotNotFound,
                "时段不存在",
            )));
        }
        Err(e) => {
            error!("Error fetching slot {}: {}", req.slot_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询时段失败: {e}"),
                )),
            );
        }
    };

    // 预约必须挂在该学员此项目的任务上
    let assignment = match storage
        .get_assignment_by_template_and_student(req.project_id, student_id)
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "你在该项目下没有任务",
            )));
        }
        Err(e) => {
            error!("Error fetching assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询任务失败: {e}"),
                )),
            );
        }
    };

    // 间隔规则对该学员同一项目的所有已有预约生效
    let existing = match storage
        .list_student_bookings_for_project(student_id, req.project_id)
        .await
    {
        Ok(existing) => existing,
        Err(e) => {
            error!("Error listing existing bookings: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询已有预约失败: {e}"),
                )),
            );
        }
    };

    if let Err(violation) = check_bookable_single(&slot, &existing, student_id) {
        return Ok(violation.into_response());
    }

    // 条件更新抢占；失败说明并发请求先到
    match storage
        .book_single_slot(req.slot_id, student_id, req.project_id, assignment.id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("时段预约成功"))),
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SlotAlreadyBooked,
            format!("时段 {} 已被预约", req.slot_id),
        ))),
        Err(e) => {
            error!("Error booking slot {}: {}", req.slot_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("预约时段失败: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn slot(id: i64, evaluator_id: i64, hour: u32, minute: u32) -> AvailabilitySlot {
        let start_at = Utc.with_ymd_and_hms(2026, 8, 4, hour, minute, 0).unwrap();
        AvailabilitySlot {
            id,
            evaluator_id,
            start_at,
            end_at: start_at + chrono::Duration::minutes(45),
            booked: false,
            booked_by: None,
            project_id: None,
            assignment_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_valid_pair_passes() {
        // 两个不同评审人，60 分钟间隔
        let pair = [slot(1, 10, 10, 0), slot(2, 20, 11, 0)];
        assert!(check_bookable_pair(&pair, 30).is_ok());
    }

    #[test]
    fn test_pair_requires_exactly_two() {
        assert_eq!(
            check_bookable_pair(&[slot(1, 10, 10, 0)], 30),
            Err(PairRuleViolation::NotExactlyTwo)
        );
    }

    #[test]
    fn test_booked_slot_rejected() {
        let mut booked = slot(1, 10, 10, 0);
        booked.booked = true;
        let pair = [booked, slot(2, 20, 11, 0)];
        assert_eq!(
            check_bookable_pair(&pair, 30),
            Err(PairRuleViolation::AlreadyBooked(1))
        );
    }

    #[test]
    fn test_self_evaluation_rejected() {
        // 学员 10 预约自己提供的时段
        let pair = [slot(1, 10, 10, 0), slot(2, 20, 11, 0)];
        assert_eq!(
            check_bookable_pair(&pair, 10),
            Err(PairRuleViolation::SelfEvaluation)
        );
    }

    #[test]
    fn test_same_evaluator_rejected() {
        let pair = [slot(1, 10, 10, 0), slot(2, 10, 11, 0)];
        assert_eq!(
            check_bookable_pair(&pair, 30),
            Err(PairRuleViolation::SameEvaluator)
        );
    }

    #[test]
    fn test_too_close_rejected() {
        // 起始间隔 30 分钟 < 45 分钟
        let pair = [slot(1, 10, 10, 0), slot(2, 20, 10, 30)];
        assert_eq!(
            check_bookable_pair(&pair, 30),
            Err(PairRuleViolation::TooClose)
        );
    }

    #[test]
    fn test_single_booking_spacing_against_all_existing() {
        let candidate = slot(3, 20, 11, 0);
        // 已有预约 10:00，与 11:00 间隔满足；再加一条 10:45 的就不满足
        let ok_existing = vec![slot(1, 10, 10, 0)];
        assert!(check_bookable_single(&candidate, &ok_existing, 30).is_ok());

        let close_existing = vec![slot(1, 10, 10, 0), slot(2, 40, 10, 45)];
        assert_eq!(
            check_bookable_single(&candidate, &close_existing, 30),
            Err(PairRuleViolation::TooClose)
        );
    }
}
