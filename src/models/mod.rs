mod address;
mod cart;
mod customer;
mod order;
mod product;
mod session;

pub use address::*;
pub use cart::*;
pub use customer::*;
pub use order::*;
pub use product::*;
pub use session::*;
