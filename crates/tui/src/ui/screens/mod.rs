pub mod login;
pub mod resources;
