pub mod cart;
pub mod game;
pub mod promotion;
pub mod user;
pub mod wallet;

pub use cart::cart_config;
pub use game::game_config;
pub use promotion::promotion_config;
pub use user::user_config;
pub use wallet::wallet_config;
