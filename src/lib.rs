pub mod annotation;
pub mod export;
pub mod schedule;
pub mod session;
