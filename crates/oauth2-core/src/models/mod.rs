pub mod authorization;
pub mod client;
pub mod error;
pub mod jwt;
pub mod scope;
pub mod token;
pub mod user;

pub use authorization::*;
pub use client::*;
pub use error::*;
pub use jwt::*;
pub use token::*;
pub use user::*;
