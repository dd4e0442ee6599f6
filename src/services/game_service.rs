use crate::error::{AppError, AppResult};
use crate::models::*;
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};

const GAME_COLUMNS: &str = r#"
    g.game_id, g.game_name, g.price, g.category_id, c.category_name,
    g.game_image, g.description, g.release_date, g.purchase_count
"#;

#[derive(Clone)]
pub struct GameService {
    pool: PgPool,
}

impl GameService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_games(&self) -> AppResult<Vec<Game>> {
        let games: Vec<Game> = sqlx::query_as(&format!(
            r#"
            SELECT {GAME_COLUMNS}
            FROM games g
            LEFT JOIN categories c ON g.category_id = c.category_id
            ORDER BY g.release_date DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    pub async fn get_game(&self, game_id: i64) -> AppResult<Game> {
        let game: Option<Game> = sqlx::query_as(&format!(
            r#"
            SELECT {GAME_COLUMNS}
            FROM games g
            LEFT JOIN categories c ON g.category_id = c.category_id
            WHERE g.game_id = $1
            "#
        ))
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        game.ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    pub async fn create_game(&self, request: CreateGameRequest) -> AppResult<CreateGameResponse> {
        let game_name = request.game_name.trim().to_string();
        if game_name.is_empty() {
            return Err(AppError::ValidationError(
                "Game name is required".to_string(),
            ));
        }
        if request.price < Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Price must be greater than or equal to 0".to_string(),
            ));
        }

        let game_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO games (game_name, price, category_id, game_image, description, release_date, purchase_count)
            VALUES ($1, $2, $3, $4, $5, $6, 0)
            RETURNING game_id
            "#,
        )
        .bind(&game_name)
        .bind(request.price)
        .bind(request.category_id)
        .bind(&request.game_image)
        .bind(&request.description)
        .bind(request.release_date)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Created game {game_id} ({game_name})");

        Ok(CreateGameResponse { game_id })
    }

    /// 部分更新，未提供的字段保持原值
    pub async fn update_game(
        &self,
        game_id: i64,
        request: UpdateGameRequest,
    ) -> AppResult<MessageResponse> {
        self.ensure_game_exists(game_id).await?;

        if let Some(price) = request.price
            && price < Decimal::ZERO
        {
            return Err(AppError::ValidationError(
                "Price must be greater than or equal to 0".to_string(),
            ));
        }

        sqlx::query(
            r#"
            UPDATE games
            SET game_name = COALESCE($1, game_name),
                price = COALESCE($2, price),
                category_id = COALESCE($3, category_id),
                game_image = COALESCE($4, game_image),
                description = COALESCE($5, description)
            WHERE game_id = $6
            "#,
        )
        .bind(&request.game_name)
        .bind(request.price)
        .bind(request.category_id)
        .bind(&request.game_image)
        .bind(&request.description)
        .bind(game_id)
        .execute(&self.pool)
        .await?;

        Ok(MessageResponse::new("Game updated successfully"))
    }

    pub async fn delete_game(&self, game_id: i64) -> AppResult<MessageResponse> {
        self.ensure_game_exists(game_id).await?;

        sqlx::query("DELETE FROM games WHERE game_id = $1")
            .bind(game_id)
            .execute(&self.pool)
            .await?;

        log::info!("Deleted game {game_id}");

        Ok(MessageResponse::new("Game deleted successfully"))
    }

    /// 名称/描述模糊搜索，可按分类过滤（"all" 表示不过滤）
    pub async fn search_games(&self, query: &GameSearchQuery) -> AppResult<Vec<Game>> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            r#"
            SELECT {GAME_COLUMNS}
            FROM games g
            LEFT JOIN categories c ON g.category_id = c.category_id
            WHERE 1=1
            "#
        ));

        if let Some(text) = &query.query
            && !text.is_empty()
        {
            let pattern = format!("%{text}%");
            builder
                .push(" AND (g.game_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR g.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(category_id) = &query.category_id
            && category_id != "all"
        {
            let category_id: i64 = category_id.parse().map_err(|_| {
                AppError::ValidationError("Invalid category_id".to_string())
            })?;
            builder.push(" AND g.category_id = ").push_bind(category_id);
        }

        builder.push(" ORDER BY g.release_date DESC");

        let games: Vec<Game> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(games)
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories: Vec<Category> = sqlx::query_as(
            "SELECT category_id, category_name, created_at FROM categories ORDER BY category_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn ensure_game_exists(&self, game_id: i64) -> AppResult<()> {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT game_id FROM games WHERE game_id = $1")
                .bind(game_id)
                .fetch_optional(&self.pool)
                .await?;

        existing
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }
}
