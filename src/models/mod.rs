pub mod cart;
pub mod checkout;
pub mod common;
pub mod game;
pub mod promotion;
pub mod user;
pub mod wallet;

pub use cart::*;
pub use checkout::*;
pub use common::*;
pub use game::*;
pub use promotion::*;
pub use user::*;
pub use wallet::*;
