use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "注册成功", body = RegisterResponse),
        (status = 400, description = "请求参数错误或邮箱已注册")
    )
)]
pub async fn register(
    auth_service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    match auth_service.register(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功，返回不含密码的用户信息", body = UserResponse),
        (status = 400, description = "账号不存在或密码错误")
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "user",
    request_body = UpdateUserRequest,
    params(("id" = i64, Path, description = "用户ID")),
    responses(
        (status = 200, description = "更新成功", body = UpdateUserResponse),
        (status = 400, description = "无可更新字段或邮箱已被占用"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn update_user(
    auth_service: web::Data<AuthService>,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    match auth_service.update_user(user_id, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}/change-password",
    tag = "user",
    request_body = ChangePasswordRequest,
    params(("id" = i64, Path, description = "用户ID")),
    responses(
        (status = 200, description = "密码修改成功", body = MessageResponse),
        (status = 400, description = "旧密码错误或新密码不合法"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn change_password(
    auth_service: web::Data<AuthService>,
    path: web::Path<i64>,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    match auth_service
        .change_password(user_id, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "user",
    params(("id" = i64, Path, description = "用户ID")),
    responses(
        (status = 200, description = "用户信息", body = UserResponse),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn get_user(
    auth_service: web::Data<AuthService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match auth_service.get_user(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/allusers",
    tag = "user",
    responses(
        (status = 200, description = "普通用户列表", body = [UserResponse])
    )
)]
pub async fn all_users(auth_service: web::Data<AuthService>) -> Result<HttpResponse> {
    match auth_service.list_users().await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/update/{id}", web::put().to(update_user))
        .route("/users/{id}/change-password", web::put().to(change_password))
        .route("/user/{id}", web::get().to(get_user))
        .route("/allusers", web::get().to(all_users));
}
