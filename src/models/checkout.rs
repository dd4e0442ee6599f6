use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutItem {
    pub game_id: i64,
    #[schema(value_type = String, example = "299.00")]
    pub game_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub user_id: i64,
    pub cart_id: i64,
    pub promotion_id: Option<i64>,
    pub items: Vec<CheckoutItem>,
    #[schema(value_type = String, example = "598.00")]
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub buy_id: i64,
    #[schema(value_type = String, example = "200.00")]
    pub remaining_balance: Decimal,
}
