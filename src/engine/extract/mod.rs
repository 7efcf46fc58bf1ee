pub mod contacts;
pub mod services;

pub use contacts::{extract_emails, extract_phones};
pub use services::extract_services;
