pub mod compose_notifications;
pub mod place_hold;
