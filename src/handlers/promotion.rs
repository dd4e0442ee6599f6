use crate::models::*;
use crate::services::PromotionService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/promotions",
    tag = "promotion",
    responses(
        (status = 200, description = "促销列表")
    )
)]
pub async fn list_promotions(
    promotion_service: web::Data<PromotionService>,
) -> Result<HttpResponse> {
    match promotion_service.list_promotions().await {
        Ok(promotions) => Ok(HttpResponse::Ok().json(json!({ "promotions": promotions }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/promotions/{id}",
    tag = "promotion",
    params(("id" = i64, Path, description = "促销ID")),
    responses(
        (status = 200, description = "促销详情", body = Promotion),
        (status = 404, description = "促销不存在")
    )
)]
pub async fn get_promotion(
    promotion_service: web::Data<PromotionService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match promotion_service.get_promotion(path.into_inner()).await {
        Ok(promotion) => Ok(HttpResponse::Ok().json(promotion)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/promotions",
    tag = "promotion",
    request_body = CreatePromotionRequest,
    responses(
        (status = 201, description = "创建成功", body = CreatePromotionResponse),
        (status = 400, description = "参数错误")
    )
)]
pub async fn create_promotion(
    promotion_service: web::Data<PromotionService>,
    request: web::Json<CreatePromotionRequest>,
) -> Result<HttpResponse> {
    match promotion_service.create_promotion(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn promotion_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/promotions", web::get().to(list_promotions))
        .route("/promotions", web::post().to(create_promotion))
        .route("/promotions/{id}", web::get().to(get_promotion));
}
