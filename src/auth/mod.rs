//! Authentication core: token signing, password hashing, the revocation
//! denylist, and the session token manager that ties them together.

pub mod denylist;
pub mod manager;
pub mod password;
pub mod token;

pub use manager::{CredentialPair, SessionTokenManager};
pub use password::{hash_password, verify_password};
pub use token::AccessContext;
