pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod session;
