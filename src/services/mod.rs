pub mod auth;
pub mod lookup;
pub mod system;
pub mod test_runner;

pub use auth::AuthService;
pub use system::SystemService;
pub use test_runner::{HttpTestExecutor, TestExecutor, TestRunService};
