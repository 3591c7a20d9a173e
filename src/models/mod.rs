// Model exports
pub mod page;
pub mod responses;
pub mod session;

pub use page::PageData;
pub use responses::{ErrorResponse, HealthResponse};
pub use session::{Claims, Session, VerifiedUser};
