pub mod auth;

pub mod users;

pub mod availability;

pub mod projects;

pub mod evaluations;

pub mod notifications;

pub use auth::configure_auth_routes;
pub use availability::configure_availability_routes;
pub use evaluations::configure_evaluations_routes;
pub use notifications::configure_notifications_routes;
pub use projects::configure_projects_routes;
pub use users::configure_user_routes;
