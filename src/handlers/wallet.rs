use crate::models::*;
use crate::services::WalletService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/wallet/deposit",
    tag = "wallet",
    request_body = DepositRequest,
    responses(
        (status = 201, description = "充值成功", body = DepositResponse),
        (status = 400, description = "金额必须大于零"),
        (status = 404, description = "用户不存在")
    )
)]
pub async fn deposit(
    wallet_service: web::Data<WalletService>,
    request: web::Json<DepositRequest>,
) -> Result<HttpResponse> {
    match wallet_service.deposit(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user/transactions/{user_id}",
    tag = "wallet",
    params(("user_id" = i64, Path, description = "用户ID")),
    responses(
        (status = 200, description = "钱包流水，购买类条目附带关联订单", body = TransactionHistoryResponse)
    )
)]
pub async fn get_transactions(
    wallet_service: web::Data<WalletService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match wallet_service.get_user_transactions(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wallet_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/wallet").route("/deposit", web::post().to(deposit)))
        .route("/user/transactions/{user_id}", web::get().to(get_transactions));
}
