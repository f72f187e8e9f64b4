//! Shared domain types for Crescent Commerce.

pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod phone;
pub mod price;
pub mod product;
pub mod status;
pub mod subscription;

pub use cart::*;
pub use email::*;
pub use id::*;
pub use order::*;
pub use phone::*;
pub use price::*;
pub use product::*;
pub use status::*;
pub use subscription::*;
