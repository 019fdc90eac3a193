pub mod category;
pub mod chat;
pub mod draft;
pub mod link;
pub mod prediction;
pub mod slug;
