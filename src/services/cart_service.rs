use crate::error::{AppError, AppResult};
use crate::models::*;
use sqlx::PgPool;

#[derive(Clone)]
pub struct CartService {
    pool: PgPool,
}

impl CartService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 加入购物车：已拥有或已在购物车中的游戏会被拒绝，
    /// 用户第一次加购时懒创建购物车
    pub async fn add_to_cart(&self, request: AddToCartRequest) -> AppResult<MessageResponse> {
        let user: Option<i64> = sqlx::query_scalar("SELECT user_id FROM users WHERE user_id = $1")
            .bind(request.user_id)
            .fetch_optional(&self.pool)
            .await?;
        user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let game: Option<i64> = sqlx::query_scalar("SELECT game_id FROM games WHERE game_id = $1")
            .bind(request.game_id)
            .fetch_optional(&self.pool)
            .await?;
        game.ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

        // 已购买过的游戏不能重复购买
        let owned: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT i.buy_item_id
            FROM buy_items i
            JOIN buys b ON i.buy_id = b.buy_id
            WHERE b.user_id = $1 AND i.game_id = $2
            LIMIT 1
            "#,
        )
        .bind(request.user_id)
        .bind(request.game_id)
        .fetch_optional(&self.pool)
        .await?;

        if owned.is_some() {
            return Err(AppError::ValidationError(
                "Game is already owned".to_string(),
            ));
        }

        // 没有购物车则创建
        let cart_id: Option<i64> = sqlx::query_scalar("SELECT cart_id FROM carts WHERE user_id = $1")
            .bind(request.user_id)
            .fetch_optional(&self.pool)
            .await?;

        let cart_id = match cart_id {
            Some(id) => id,
            None => {
                sqlx::query_scalar("INSERT INTO carts (user_id) VALUES ($1) RETURNING cart_id")
                    .bind(request.user_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        let in_cart: Option<i64> = sqlx::query_scalar(
            "SELECT cart_item_id FROM cart_items WHERE cart_id = $1 AND game_id = $2",
        )
        .bind(cart_id)
        .bind(request.game_id)
        .fetch_optional(&self.pool)
        .await?;

        if in_cart.is_some() {
            return Err(AppError::ValidationError(
                "Game is already in the cart".to_string(),
            ));
        }

        sqlx::query("INSERT INTO cart_items (cart_id, game_id) VALUES ($1, $2)")
            .bind(cart_id)
            .bind(request.game_id)
            .execute(&self.pool)
            .await?;

        Ok(MessageResponse::new("Game added to cart"))
    }

    pub async fn get_cart(&self, user_id: i64) -> AppResult<Vec<CartItemResponse>> {
        let items: Vec<CartItemResponse> = sqlx::query_as(
            r#"
            SELECT ci.cart_item_id, ci.cart_id, ci.game_id,
                   g.game_name, g.price, g.game_image
            FROM cart_items ci
            JOIN carts c ON ci.cart_id = c.cart_id
            JOIN games g ON ci.game_id = g.game_id
            WHERE c.user_id = $1
            ORDER BY ci.cart_item_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn remove_from_cart(&self, user_id: i64, game_id: i64) -> AppResult<MessageResponse> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_items
            WHERE game_id = $1
              AND cart_id IN (SELECT cart_id FROM carts WHERE user_id = $2)
            "#,
        )
        .bind(game_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Game not found in cart".to_string()));
        }

        Ok(MessageResponse::new("Game removed from cart"))
    }
}
