use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 业务错误码
//
// 0 为成功；1xxx 为通用错误；2xxx 时段；3xxx 项目/任务；4xxx 评审；5xxx 通知
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    AuthFailed = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    UserAlreadyExists = 1006,
    UserNotFound = 1007,
    UserBlocked = 1008,

    // 可用时段
    SlotNotFound = 2001,
    SlotWindowInvalid = 2002,
    SlotOverlap = 2003,
    SlotAlreadyBooked = 2004,
    SlotPairInvalid = 2005,
    SlotSpacingTooClose = 2006,
    SelfEvaluationForbidden = 2007,

    // 项目与任务
    TemplateNotFound = 3001,
    TemplateOrderConflict = 3002,
    AssignmentNotFound = 3003,
    AssignmentStateInvalid = 3004,
    AssignmentAlreadyExists = 3005,
    RepoUrlInvalid = 3006,

    // 评审
    EvaluationNotFound = 4001,
    EvaluationAlreadySubmitted = 4002,
    FeedbackIncomplete = 4003,
    NotDesignatedEvaluator = 4004,

    // 通知
    NotificationNotFound = 5001,
}
