pub mod auth;
pub mod evaluations;
pub mod notifications;
pub mod progression;
pub mod projects;
pub mod slots;
pub mod users;

pub use auth::AuthService;
pub use evaluations::EvaluationService;
pub use notifications::NotificationService;
pub use projects::ProjectService;
pub use slots::SlotService;
pub use users::UserService;
