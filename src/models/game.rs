use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Game {
    pub game_id: i64,
    pub game_name: String,
    #[schema(value_type = String, example = "299.00")]
    pub price: Decimal,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub game_image: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub purchase_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    #[schema(example = "Stardew Valley")]
    pub game_name: String,
    #[schema(value_type = String, example = "299.00")]
    pub price: Decimal,
    pub category_id: Option<i64>,
    pub game_image: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateGameResponse {
    pub game_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateGameRequest {
    pub game_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub game_image: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, IntoParams)]
pub struct GameSearchQuery {
    /// 按名称或描述模糊匹配
    pub query: Option<String>,
    /// 分类过滤，"all" 表示不过滤
    pub category_id: Option<String>,
}
