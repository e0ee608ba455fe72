pub mod client_ip;
pub mod health_handler;
pub mod quiz_handler;

pub use client_ip::resolve_client_ip;
pub use health_handler::health_check;
pub use quiz_handler::{delete_responses, get_quiz, save_quiz, sync_responses};
