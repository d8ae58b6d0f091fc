pub mod content_llm;
pub mod graph_api;
pub mod schemas;

pub use content_llm::OpenAiContentAdapter;
pub use graph_api::GraphApiAdapter;
