// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod model_info;
pub mod model_list_response;
pub mod turn;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::{ChatResponse, ResponseMessage};
pub use model_info::ModelInfo;
pub use model_list_response::ModelListResponse;
pub use turn::{Role, Turn};
