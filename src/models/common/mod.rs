pub mod pagination;
pub mod response;

pub use pagination::{PAGE_SIZE, normalize_offset};
pub use response::{ApiResponse, ErrorCode};
