pub mod auth_service;
pub use auth_service::{AuthError, AuthService, LoginResult};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod credentials;
pub use credentials::CredentialStore;

pub mod tokens;
pub use tokens::{TokenIssuer, TokenValidator};

pub mod guard;
pub use guard::AuthorizationGuard;

pub mod post_service;
pub use post_service::{PostError, PostService};

pub mod post_service_impl;
pub use post_service_impl::SeaOrmPostService;
