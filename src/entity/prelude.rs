//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::availability_slots::{
    ActiveModel as AvailabilitySlotActiveModel, Entity as AvailabilitySlots,
    Model as AvailabilitySlotModel,
};
pub use super::badges::{ActiveModel as BadgeActiveModel, Entity as Badges, Model as BadgeModel};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::project_templates::{
    ActiveModel as ProjectTemplateActiveModel, Entity as ProjectTemplates,
    Model as ProjectTemplateModel,
};
pub use super::user_badges::{
    ActiveModel as UserBadgeActiveModel, Entity as UserBadges, Model as UserBadgeModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
