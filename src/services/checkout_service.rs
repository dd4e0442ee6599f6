use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::wallet_service::apply_balance_change;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// 进入事务前的纯校验，失败时不产生任何副作用
fn validate_checkout_request(request: &CheckoutRequest) -> AppResult<()> {
    if request.items.is_empty() {
        return Err(AppError::ValidationError(
            "Order items are required".to_string(),
        ));
    }

    if request.total_price < Decimal::ZERO {
        return Err(AppError::ValidationError(
            "Total price must not be negative".to_string(),
        ));
    }

    if request
        .items
        .iter()
        .any(|item| item.game_price < Decimal::ZERO)
    {
        return Err(AppError::ValidationError(
            "Game price must not be negative".to_string(),
        ));
    }

    Ok(())
}

#[derive(Clone)]
pub struct CheckoutService {
    pool: PgPool,
}

impl CheckoutService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 结算：扣款、建订单、记录明细、累加销量、清购物车、扣减促销次数，
    /// 全部在一个事务内完成。任何一步出错整个事务回滚，不留部分状态。
    pub async fn buy_game(&self, request: CheckoutRequest) -> AppResult<CheckoutResponse> {
        validate_checkout_request(&request)?;

        let mut tx = self.pool.begin().await?;

        // 扣款并记流水；余额不足或用户不存在时这里返回错误，事务随 drop 回滚
        let remaining_balance = apply_balance_change(
            &mut tx,
            request.user_id,
            -request.total_price,
            TransactionType::Purchase,
        )
        .await?;

        let buy_id: i64 = sqlx::query_scalar(
            "INSERT INTO buys (user_id, total_price, promotion_id) VALUES ($1, $2, $3) RETURNING buy_id",
        )
        .bind(request.user_id)
        .bind(request.total_price)
        .bind(request.promotion_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in &request.items {
            // 订单明细带下单时的价格，不回读目录价
            sqlx::query("INSERT INTO buy_items (buy_id, game_id, game_price) VALUES ($1, $2, $3)")
                .bind(buy_id)
                .bind(item.game_id)
                .bind(item.game_price)
                .execute(&mut *tx)
                .await?;

            sqlx::query("UPDATE games SET purchase_count = purchase_count + 1 WHERE game_id = $1")
                .bind(item.game_id)
                .execute(&mut *tx)
                .await?;

            // 从购物车移除已购买的游戏
            sqlx::query(
                r#"
                DELETE FROM cart_items
                WHERE game_id = $1
                  AND cart_id IN (SELECT cart_id FROM carts WHERE user_id = $2)
                "#,
            )
            .bind(item.game_id)
            .bind(request.user_id)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(promotion_id) = request.promotion_id {
            // 条件更新：次数已用完时不扣减也不影响下单
            sqlx::query(
                r#"
                UPDATE promotions
                SET limit_promotion = limit_promotion - 1
                WHERE promotion_id = $1 AND limit_promotion > 0
                "#,
            )
            .bind(promotion_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        log::info!(
            "User {} completed checkout {} for {} ({} items)",
            request.user_id,
            buy_id,
            request.total_price,
            request.items.len()
        );

        Ok(CheckoutResponse {
            buy_id,
            remaining_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: Vec<CheckoutItem>, total_price: &str) -> CheckoutRequest {
        CheckoutRequest {
            user_id: 1,
            cart_id: 1,
            promotion_id: None,
            items,
            total_price: total_price.parse().unwrap(),
        }
    }

    fn item(game_id: i64, price: &str) -> CheckoutItem {
        CheckoutItem {
            game_id,
            game_price: price.parse().unwrap(),
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = validate_checkout_request(&request(vec![], "0.00"));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_negative_total_rejected() {
        let result = validate_checkout_request(&request(vec![item(1, "299.00")], "-1.00"));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_negative_item_price_rejected() {
        let result = validate_checkout_request(&request(
            vec![item(1, "299.00"), item(2, "-5.00")],
            "294.00",
        ));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_valid_request_passes() {
        let result = validate_checkout_request(&request(
            vec![item(1, "299.00"), item(2, "199.00")],
            "498.00",
        ));
        assert!(result.is_ok());
    }
}
