use crate::models::*;
use crate::services::GameService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/games",
    tag = "game",
    responses(
        (status = 200, description = "游戏列表，按发售日期倒序")
    )
)]
pub async fn list_games(game_service: web::Data<GameService>) -> Result<HttpResponse> {
    match game_service.list_games().await {
        Ok(games) => Ok(HttpResponse::Ok().json(json!({ "games": games }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/games/search",
    tag = "game",
    params(GameSearchQuery),
    responses(
        (status = 200, description = "搜索结果"),
        (status = 400, description = "分类参数无效")
    )
)]
pub async fn search_games(
    game_service: web::Data<GameService>,
    query: web::Query<GameSearchQuery>,
) -> Result<HttpResponse> {
    match game_service.search_games(&query).await {
        Ok(games) => Ok(HttpResponse::Ok().json(json!({ "games": games }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "game",
    params(("id" = i64, Path, description = "游戏ID")),
    responses(
        (status = 200, description = "游戏详情"),
        (status = 404, description = "游戏不存在")
    )
)]
pub async fn get_game(
    game_service: web::Data<GameService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match game_service.get_game(path.into_inner()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(json!({ "game": game }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/games",
    tag = "game",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "创建成功", body = CreateGameResponse),
        (status = 400, description = "名称缺失或价格为负")
    )
)]
pub async fn create_game(
    game_service: web::Data<GameService>,
    request: web::Json<CreateGameRequest>,
) -> Result<HttpResponse> {
    match game_service.create_game(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/games/{id}",
    tag = "game",
    request_body = UpdateGameRequest,
    params(("id" = i64, Path, description = "游戏ID")),
    responses(
        (status = 200, description = "更新成功", body = MessageResponse),
        (status = 400, description = "价格为负"),
        (status = 404, description = "游戏不存在")
    )
)]
pub async fn update_game(
    game_service: web::Data<GameService>,
    path: web::Path<i64>,
    request: web::Json<UpdateGameRequest>,
) -> Result<HttpResponse> {
    match game_service
        .update_game(path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/games/{id}",
    tag = "game",
    params(("id" = i64, Path, description = "游戏ID")),
    responses(
        (status = 200, description = "删除成功", body = MessageResponse),
        (status = 404, description = "游戏不存在")
    )
)]
pub async fn delete_game(
    game_service: web::Data<GameService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match game_service.delete_game(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "game",
    responses(
        (status = 200, description = "分类列表")
    )
)]
pub async fn list_categories(game_service: web::Data<GameService>) -> Result<HttpResponse> {
    match game_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({ "categories": categories }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn game_config(cfg: &mut web::ServiceConfig) {
    // /games/search 必须先于 /games/{id} 注册
    cfg.route("/games", web::get().to(list_games))
        .route("/games", web::post().to(create_game))
        .route("/games/search", web::get().to(search_games))
        .route("/games/{id}", web::get().to(get_game))
        .route("/games/{id}", web::put().to(update_game))
        .route("/games/{id}", web::delete().to(delete_game))
        .route("/categories", web::get().to(list_categories));
}
