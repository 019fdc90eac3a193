pub mod offline;
pub mod openai;

pub use offline::OfflineClient;
pub use openai::OpenAiClient;
