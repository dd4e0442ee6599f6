use crate::models::*;
use crate::services::{CartService, CheckoutService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/cart/gametocart",
    tag = "cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "加入购物车成功", body = MessageResponse),
        (status = 400, description = "游戏已拥有或已在购物车中"),
        (status = 404, description = "用户或游戏不存在")
    )
)]
pub async fn add_to_cart(
    cart_service: web::Data<CartService>,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse> {
    match cart_service.add_to_cart(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cart/cartUser/{user_id}",
    tag = "cart",
    params(("user_id" = i64, Path, description = "用户ID")),
    responses(
        (status = 200, description = "购物车内容", body = [CartItemResponse])
    )
)]
pub async fn get_cart(
    cart_service: web::Data<CartService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match cart_service.get_cart(path.into_inner()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(items)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart/cart/{user_id}/{game_id}",
    tag = "cart",
    params(
        ("user_id" = i64, Path, description = "用户ID"),
        ("game_id" = i64, Path, description = "游戏ID")
    ),
    responses(
        (status = 200, description = "移除成功", body = MessageResponse),
        (status = 404, description = "购物车中没有该游戏")
    )
)]
pub async fn remove_from_cart(
    cart_service: web::Data<CartService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (user_id, game_id) = path.into_inner();
    match cart_service.remove_from_cart(user_id, game_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/buyGame",
    tag = "cart",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "下单成功", body = CheckoutResponse),
        (status = 400, description = "参数错误或余额不足"),
        (status = 404, description = "用户不存在"),
        (status = 500, description = "服务器内部错误，事务已回滚")
    )
)]
pub async fn buy_game(
    checkout_service: web::Data<CheckoutService>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    match checkout_service.buy_game(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("/gametocart", web::post().to(add_to_cart))
            .route("/cartUser/{user_id}", web::get().to(get_cart))
            .route("/cart/{user_id}/{game_id}", web::delete().to(remove_from_cart))
            .route("/buyGame", web::post().to(buy_game)),
    );
}
