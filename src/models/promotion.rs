use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Promotion {
    pub promotion_id: i64,
    pub promotion_name: String,
    #[schema(value_type = String, example = "50.00")]
    pub discount_value: Decimal,
    pub limit_promotion: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePromotionRequest {
    #[schema(example = "Summer Sale")]
    pub promotion_name: String,
    #[schema(value_type = String, example = "50.00")]
    pub discount_value: Decimal,
    pub limit_promotion: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePromotionResponse {
    pub promotion_id: i64,
}
