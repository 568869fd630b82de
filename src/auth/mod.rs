pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::{Claims, Session};
pub use jwt::JwtService;
pub use middleware::AuthenticatedUser;
pub use utils::{require_admin, require_role, require_self_or_admin, session_from_context};
