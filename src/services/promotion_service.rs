use crate::error::{AppError, AppResult};
use crate::models::*;
use rust_decimal::Decimal;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PromotionService {
    pool: PgPool,
}

impl PromotionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_promotions(&self) -> AppResult<Vec<Promotion>> {
        let promotions: Vec<Promotion> = sqlx::query_as(
            r#"
            SELECT promotion_id, promotion_name, discount_value, limit_promotion
            FROM promotions
            ORDER BY promotion_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(promotions)
    }

    pub async fn get_promotion(&self, promotion_id: i64) -> AppResult<Promotion> {
        let promotion: Option<Promotion> = sqlx::query_as(
            r#"
            SELECT promotion_id, promotion_name, discount_value, limit_promotion
            FROM promotions
            WHERE promotion_id = $1
            "#,
        )
        .bind(promotion_id)
        .fetch_optional(&self.pool)
        .await?;

        promotion.ok_or_else(|| AppError::NotFound("Promotion not found".to_string()))
    }

    pub async fn create_promotion(
        &self,
        request: CreatePromotionRequest,
    ) -> AppResult<CreatePromotionResponse> {
        let promotion_name = request.promotion_name.trim().to_string();
        if promotion_name.is_empty() {
            return Err(AppError::ValidationError(
                "Promotion name is required".to_string(),
            ));
        }
        if request.discount_value < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Discount value must be greater than or equal to 0".to_string(),
            ));
        }
        if request.limit_promotion < 0 {
            return Err(AppError::ValidationError(
                "Promotion limit must be greater than or equal to 0".to_string(),
            ));
        }

        let promotion_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO promotions (promotion_name, discount_value, limit_promotion)
            VALUES ($1, $2, $3)
            RETURNING promotion_id
            "#,
        )
        .bind(&promotion_name)
        .bind(request.discount_value)
        .bind(request.limit_promotion)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Created promotion {promotion_id} ({promotion_name})");

        Ok(CreatePromotionResponse { promotion_id })
    }
}
