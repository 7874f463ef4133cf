pub mod admin;
pub mod quotes;
pub mod ws;
