/// Database models
///
/// - `user`: the only entity; created by a single INSERT, read by a single SELECT

pub mod user;

pub use user::{CreateUser, User};
