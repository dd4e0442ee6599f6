use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, validate_password, verify_password};
use sqlx::{PgPool, QueryBuilder};

const USER_COLUMNS: &str =
    "user_id, username, email, password_hash, profile, user_type, wallet, created_at, updated_at";

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        if username.is_empty() || email.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Username, email and password are required".to_string(),
            ));
        }

        validate_password(&request.password)?;

        // 检查邮箱是否已注册
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT user_id FROM users WHERE email = $1 LIMIT 1")
                .bind(&email)
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user_type = request.user_type.unwrap_or(UserType::Normal);

        let user_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password_hash, profile, user_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id
            "#,
        )
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .bind(&request.profile)
        .bind(&user_type)
        .fetch_one(&self.pool)
        .await?;

        log::info!("Registered user {user_id} ({email})");

        Ok(RegisterResponse { user_id })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<UserResponse> {
        let email = request.email.trim().to_lowercase();

        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }

        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1"
        ))
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let user = user.ok_or_else(|| AppError::ValidationError("Account not found".to_string()))?;

        let is_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::ValidationError(
                "Incorrect password".to_string(),
            ));
        }

        Ok(UserResponse::from(user))
    }

    /// 更新用户资料（用户名/邮箱/简介），全部缺省时报错
    pub async fn update_user(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> AppResult<UpdateUserResponse> {
        self.get_user_by_id(user_id).await?;

        if request.username.is_none() && request.email.is_none() && request.profile.is_none() {
            return Err(AppError::ValidationError(
                "No fields to update".to_string(),
            ));
        }

        let email = match &request.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                // 邮箱查重，排除自己
                let duplicate: Option<i64> = sqlx::query_scalar(
                    "SELECT user_id FROM users WHERE email = $1 AND user_id != $2 LIMIT 1",
                )
                .bind(&email)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

                if duplicate.is_some() {
                    return Err(AppError::ValidationError(
                        "Email is already registered".to_string(),
                    ));
                }
                Some(email)
            }
            None => None,
        };

        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("UPDATE users SET updated_at = NOW()");
        if let Some(username) = &request.username {
            builder.push(", username = ").push_bind(username);
        }
        if let Some(email) = &email {
            builder.push(", email = ").push_bind(email);
        }
        if let Some(profile) = &request.profile {
            builder.push(", profile = ").push_bind(profile);
        }
        builder.push(" WHERE user_id = ").push_bind(user_id);

        let result = builder.build().execute(&self.pool).await?;

        Ok(UpdateUserResponse {
            affected_rows: result.rows_affected(),
        })
    }

    /// 校验旧密码后更新为新密码
    pub async fn change_password(
        &self,
        user_id: i64,
        request: ChangePasswordRequest,
    ) -> AppResult<MessageResponse> {
        let user = self.get_user_by_id(user_id).await?;

        let is_valid = verify_password(&request.old_password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::ValidationError(
                "Old password is incorrect".to_string(),
            ));
        }

        validate_password(&request.new_password)?;
        let password_hash = hash_password(&request.new_password)?;

        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE user_id = $2")
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        log::info!("User {user_id} changed password");

        Ok(MessageResponse::new("Password changed successfully"))
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = self.get_user_by_id(user_id).await?;
        Ok(UserResponse::from(user))
    }

    /// 普通用户列表（不含密码哈希）
    pub async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users: Vec<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_type = $1 ORDER BY user_id"
        ))
        .bind(UserType::Normal)
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user_by_id(&self, user_id: i64) -> AppResult<User> {
        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
