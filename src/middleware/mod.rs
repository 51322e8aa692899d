pub mod session;

pub use session::{get_current_session, login_redirect, CurrentSession};
