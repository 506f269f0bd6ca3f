pub mod auth_service;
pub mod registration_service;

pub use auth_service::Authenticator;
pub use registration_service::Registrar;
