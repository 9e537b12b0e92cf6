//! Orders - cart handling and server-side checkout pricing

pub mod cart;
pub mod checkout;

pub use cart::{Cart, CartLine};
pub use checkout::price_checkout;
