pub mod cors;
pub mod jwt_extract;

pub use cors::cors_middleware;
pub use jwt_extract::JwtExtract;
