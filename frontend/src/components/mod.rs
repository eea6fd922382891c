pub mod feedback;
pub mod guard;
pub mod notice;
pub mod reason_dialog;
