pub mod macros;
pub mod prelude;
mod request;
mod response;
pub mod setup;
pub mod user;
