pub mod chat;
pub mod crawler;
pub mod matcher;
pub mod similarity;
