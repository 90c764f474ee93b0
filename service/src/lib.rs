pub mod draft;
pub mod dto;
pub mod error;
pub mod mutation;
pub mod query;
pub mod roster;
pub mod scoring;

pub use draft::*;
pub use roster::*;
pub use scoring::*;

pub use sea_orm;
