pub mod route;
pub mod secret;
