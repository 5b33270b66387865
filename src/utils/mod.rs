pub mod jwt;
pub mod password;
pub mod validate;

pub use jwt::{Claims, JwtUtils};
pub use password::{hash_password, verify_password};
pub use validate::{parse_id, require_non_empty};
