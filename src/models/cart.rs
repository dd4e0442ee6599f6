use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub user_id: i64,
    pub game_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CartItemResponse {
    pub cart_item_id: i64,
    pub cart_id: i64,
    pub game_id: i64,
    pub game_name: String,
    #[schema(value_type = String, example = "299.00")]
    pub price: Decimal,
    pub game_image: Option<String>,
}
