pub mod chat;
pub mod config;
pub mod search;
pub mod ticket;
pub mod tools;
