pub mod gate;
pub mod session;
pub mod storage;

pub use gate::{AdminGate, LoginOutcome, SessionStatus};
pub use session::{sanitize_return_target, AdminSession};
pub use storage::LocalStorage;
