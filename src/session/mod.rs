//! Session and authorization core: the persisted session record, the
//! credential decorator for outgoing requests, the per-navigation route
//! guard, and the login/register/logout lifecycle.
//! Keep the public surface thin and split implementation across sub-modules.

mod guard;
mod headers;
mod lifecycle;
mod record;
mod role;
mod store;


pub use guard::{evaluate, state_for, AuthState, GuardDecision, GuardSpec};
pub use headers::auth_headers;
pub use lifecycle::SessionLifecycle;
pub use record::{Session, StoredUser};
pub use role::Role;
pub use store::{SessionStore, SESSION_FILE};
