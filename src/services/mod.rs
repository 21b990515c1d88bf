pub mod auth_service;
pub mod blurb_generator;

pub use auth_service::AuthService;
pub use blurb_generator::BlurbGenerator;
