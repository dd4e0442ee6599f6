pub mod auth_service;
pub mod cart_service;
pub mod checkout_service;
pub mod game_service;
pub mod promotion_service;
pub mod wallet_service;

pub use auth_service::*;
pub use cart_service::*;
pub use checkout_service::*;
pub use game_service::*;
pub use promotion_service::*;
pub use wallet_service::*;
