pub mod store;
pub mod transform;
pub mod user;
pub mod validation;
