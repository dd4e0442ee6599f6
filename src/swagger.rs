use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::register,
        handlers::user::login,
        handlers::user::update_user,
        handlers::user::change_password,
        handlers::user::get_user,
        handlers::user::all_users,
        handlers::game::list_games,
        handlers::game::search_games,
        handlers::game::get_game,
        handlers::game::create_game,
        handlers::game::update_game,
        handlers::game::delete_game,
        handlers::game::list_categories,
        handlers::promotion::list_promotions,
        handlers::promotion::get_promotion,
        handlers::promotion::create_promotion,
        handlers::cart::add_to_cart,
        handlers::cart::get_cart,
        handlers::cart::remove_from_cart,
        handlers::cart::buy_game,
        handlers::wallet::deposit,
        handlers::wallet::get_transactions,
    ),
    components(
        schemas(
            User,
            UserType,
            UserResponse,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            UpdateUserRequest,
            UpdateUserResponse,
            ChangePasswordRequest,
            Game,
            Category,
            CreateGameRequest,
            CreateGameResponse,
            UpdateGameRequest,
            Promotion,
            CreatePromotionRequest,
            CreatePromotionResponse,
            AddToCartRequest,
            CartItemResponse,
            CheckoutItem,
            CheckoutRequest,
            CheckoutResponse,
            DepositRequest,
            DepositResponse,
            TransactionType,
            TransactionHistoryEntry,
            TransactionHistoryResponse,
            PromotionSummary,
            PurchasedGame,
            MessageResponse,
        )
    ),
    tags(
        (name = "user", description = "User registration and account API"),
        (name = "game", description = "Game catalog API"),
        (name = "promotion", description = "Promotion API"),
        (name = "cart", description = "Cart and checkout API"),
        (name = "wallet", description = "Wallet deposit and transaction history API"),
    ),
    info(
        title = "GameShop Backend API",
        version = "1.0.0",
        description = "GameShop Backend REST API documentation",
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
