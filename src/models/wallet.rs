use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "transaction_type", rename_all = "lowercase")]
pub enum TransactionType {
    #[serde(rename = "deposit")]
    Deposit,
    #[serde(rename = "purchase")]
    Purchase,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "deposit"),
            TransactionType::Purchase => write!(f, "purchase"),
        }
    }
}

/// 钱包流水行，一次余额变动对应一条
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WalletTransaction {
    pub transaction_id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepositRequest {
    pub user_id: i64,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepositResponse {
    #[schema(value_type = String, example = "600.00")]
    pub wallet_balance: Decimal,
}

/// 订单行（含 LEFT JOIN 出来的促销信息），仅用于历史视图的关联
#[derive(Debug, Clone, FromRow)]
pub struct BuyRecord {
    pub buy_id: i64,
    pub total_price: Decimal,
    pub buy_date: DateTime<Utc>,
    pub promotion_id: Option<i64>,
    pub promotion_name: Option<String>,
    pub discount_value: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PurchasedGame {
    pub buy_id: i64,
    pub game_id: i64,
    pub game_name: String,
    #[schema(value_type = String, example = "299.00")]
    pub game_price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PromotionSummary {
    pub name: String,
    #[schema(value_type = String, example = "50.00")]
    pub discount_value: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionHistoryEntry {
    pub transaction_id: i64,
    #[schema(value_type = String, example = "-300.00")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
    #[schema(value_type = Option<String>)]
    pub total_price: Option<Decimal>,
    pub buy_date: Option<DateTime<Utc>>,
    pub promotion: Option<PromotionSummary>,
    pub games: Vec<PurchasedGame>,
}

impl From<WalletTransaction> for TransactionHistoryEntry {
    /// 无关联订单（或非购买类型）时的裸流水条目
    fn from(t: WalletTransaction) -> Self {
        Self {
            transaction_id: t.transaction_id,
            amount: t.amount,
            transaction_type: t.transaction_type,
            transaction_date: t.transaction_date,
            total_price: None,
            buy_date: None,
            promotion: None,
            games: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionHistoryResponse {
    pub transactions: Vec<TransactionHistoryEntry>,
}
