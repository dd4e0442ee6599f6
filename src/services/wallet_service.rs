use crate::error::{AppError, AppResult};
use crate::models::*;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

/// 在调用方事务内原子地调整用户余额并追加一条钱包流水。
///
/// `SELECT ... FOR UPDATE` 锁定该用户的余额行，锁持有到外层事务
/// 提交或回滚为止：同一用户的并发变更串行执行，不同用户互不影响。
/// 余额不足或用户不存在时返回错误，由调用方回滚整个事务。
pub async fn apply_balance_change(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    amount: Decimal,
    kind: TransactionType,
) -> AppResult<Decimal> {
    // 锁定余额行
    let wallet: Option<Decimal> =
        sqlx::query_scalar("SELECT wallet FROM users WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await?;

    let wallet = wallet.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let new_balance = wallet + amount;
    if new_balance < Decimal::ZERO {
        return Err(AppError::ValidationError(
            "Insufficient wallet balance".to_string(),
        ));
    }

    sqlx::query("UPDATE users SET wallet = $1, updated_at = NOW() WHERE user_id = $2")
        .bind(new_balance)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query("INSERT INTO wallet_transactions (user_id, amount, type) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(amount)
        .bind(kind)
        .execute(&mut **tx)
        .await?;

    Ok(new_balance)
}

#[derive(Clone)]
pub struct WalletService {
    pool: PgPool,
}

impl WalletService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 充值
    pub async fn deposit(&self, request: DepositRequest) -> AppResult<DepositResponse> {
        if request.amount <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Deposit amount must be greater than zero".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let wallet_balance = apply_balance_change(
            &mut tx,
            request.user_id,
            request.amount,
            TransactionType::Deposit,
        )
        .await?;

        tx.commit().await?;

        log::info!(
            "User {} deposited {}, new balance {}",
            request.user_id,
            request.amount,
            wallet_balance
        );

        Ok(DepositResponse { wallet_balance })
    }

    /// 用户的钱包流水，购买类流水附带关联订单信息
    pub async fn get_user_transactions(
        &self,
        user_id: i64,
    ) -> AppResult<TransactionHistoryResponse> {
        let transactions: Vec<WalletTransaction> = sqlx::query_as(
            r#"
            SELECT transaction_id, user_id, amount, type AS transaction_type, transaction_date
            FROM wallet_transactions
            WHERE user_id = $1
            ORDER BY transaction_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        if transactions.is_empty() {
            return Ok(TransactionHistoryResponse {
                transactions: Vec::new(),
            });
        }

        let has_purchases = transactions
            .iter()
            .any(|t| t.transaction_type == TransactionType::Purchase);

        let (buys, games) = if has_purchases {
            let buys: Vec<BuyRecord> = sqlx::query_as(
                r#"
                SELECT b.buy_id, b.total_price, b.buy_date, b.promotion_id,
                       p.promotion_name, p.discount_value
                FROM buys b
                LEFT JOIN promotions p ON b.promotion_id = p.promotion_id
                WHERE b.user_id = $1
                ORDER BY b.buy_date DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

            let buy_ids: Vec<i64> = buys.iter().map(|b| b.buy_id).collect();
            let games: Vec<PurchasedGame> = if buy_ids.is_empty() {
                Vec::new()
            } else {
                sqlx::query_as(
                    r#"
                    SELECT i.buy_id, g.game_id, g.game_name, i.game_price
                    FROM buy_items i
                    JOIN games g ON i.game_id = g.game_id
                    WHERE i.buy_id = ANY($1)
                    "#,
                )
                .bind(&buy_ids)
                .fetch_all(&self.pool)
                .await?
            };

            (buys, games)
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(TransactionHistoryResponse {
            transactions: correlate_transactions(transactions, &buys, &games),
        })
    }
}

/// 购买流水与订单之间没有外键，按时间就近关联：
/// 取 buy_date 不晚于流水时间的最新一笔订单（buys 按时间倒序传入）。
/// 匹配不到的购买流水返回空的订单信息。
fn correlate_transactions(
    transactions: Vec<WalletTransaction>,
    buys: &[BuyRecord],
    games: &[PurchasedGame],
) -> Vec<TransactionHistoryEntry> {
    transactions
        .into_iter()
        .map(|t| {
            if t.transaction_type != TransactionType::Purchase {
                return TransactionHistoryEntry::from(t);
            }

            let related = buys.iter().find(|b| b.buy_date <= t.transaction_date);
            match related {
                Some(buy) => TransactionHistoryEntry {
                    transaction_id: t.transaction_id,
                    amount: t.amount,
                    transaction_type: t.transaction_type,
                    transaction_date: t.transaction_date,
                    total_price: Some(buy.total_price),
                    buy_date: Some(buy.buy_date),
                    promotion: buy.promotion_name.as_ref().map(|name| PromotionSummary {
                        name: name.clone(),
                        discount_value: buy.discount_value.unwrap_or(Decimal::ZERO),
                    }),
                    games: games
                        .iter()
                        .filter(|g| g.buy_id == buy.buy_id)
                        .cloned()
                        .collect(),
                },
                None => TransactionHistoryEntry::from(t),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
    }

    fn transaction(
        id: i64,
        kind: TransactionType,
        amount: &str,
        at: DateTime<Utc>,
    ) -> WalletTransaction {
        WalletTransaction {
            transaction_id: id,
            user_id: 1,
            amount: amount.parse().unwrap(),
            transaction_type: kind,
            transaction_date: at,
        }
    }

    fn buy(id: i64, total: &str, at: DateTime<Utc>) -> BuyRecord {
        BuyRecord {
            buy_id: id,
            total_price: total.parse().unwrap(),
            buy_date: at,
            promotion_id: None,
            promotion_name: None,
            discount_value: None,
        }
    }

    #[test]
    fn test_deposit_entries_get_no_enrichment() {
        let transactions = vec![transaction(1, TransactionType::Deposit, "100.00", ts(10, 0))];
        let buys = vec![buy(1, "100.00", ts(9, 0))];

        let entries = correlate_transactions(transactions, &buys, &[]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].total_price.is_none());
        assert!(entries[0].promotion.is_none());
        assert!(entries[0].games.is_empty());
    }

    #[test]
    fn test_purchase_matches_nearest_prior_buy() {
        // 两笔订单，流水时间落在第二笔之后：应匹配较新的那笔
        let transactions = vec![transaction(
            1,
            TransactionType::Purchase,
            "-300.00",
            ts(12, 0),
        )];
        let buys = vec![buy(2, "300.00", ts(11, 30)), buy(1, "150.00", ts(9, 0))];
        let games = vec![
            PurchasedGame {
                buy_id: 2,
                game_id: 7,
                game_name: "Stardew Valley".to_string(),
                game_price: "300.00".parse().unwrap(),
            },
            PurchasedGame {
                buy_id: 1,
                game_id: 3,
                game_name: "Celeste".to_string(),
                game_price: "150.00".parse().unwrap(),
            },
        ];

        let entries = correlate_transactions(transactions, &buys, &games);
        assert_eq!(entries[0].total_price, Some("300.00".parse().unwrap()));
        assert_eq!(entries[0].buy_date, Some(ts(11, 30)));
        assert_eq!(entries[0].games.len(), 1);
        assert_eq!(entries[0].games[0].game_id, 7);
    }

    #[test]
    fn test_purchase_with_no_prior_buy_stays_bare() {
        // 所有订单都晚于流水时间：不关联
        let transactions = vec![transaction(
            1,
            TransactionType::Purchase,
            "-300.00",
            ts(8, 0),
        )];
        let buys = vec![buy(1, "300.00", ts(9, 0))];

        let entries = correlate_transactions(transactions, &buys, &[]);
        assert!(entries[0].total_price.is_none());
        assert!(entries[0].games.is_empty());
    }

    #[test]
    fn test_promotion_attached_when_buy_references_one() {
        let transactions = vec![transaction(
            1,
            TransactionType::Purchase,
            "-250.00",
            ts(12, 0),
        )];
        let mut b = buy(1, "250.00", ts(11, 0));
        b.promotion_id = Some(5);
        b.promotion_name = Some("Summer Sale".to_string());
        b.discount_value = Some("50.00".parse().unwrap());

        let entries = correlate_transactions(transactions, &[b], &[]);
        let promotion = entries[0].promotion.as_ref().unwrap();
        assert_eq!(promotion.name, "Summer Sale");
        assert_eq!(promotion.discount_value, "50.00".parse().unwrap());
    }

    #[test]
    fn test_multiple_purchases_map_to_their_own_buys() {
        let transactions = vec![
            transaction(2, TransactionType::Purchase, "-300.00", ts(12, 0)),
            transaction(1, TransactionType::Purchase, "-150.00", ts(10, 0)),
        ];
        let buys = vec![buy(2, "300.00", ts(11, 55)), buy(1, "150.00", ts(9, 55))];

        let entries = correlate_transactions(transactions, &buys, &[]);
        assert_eq!(entries[0].total_price, Some("300.00".parse().unwrap()));
        assert_eq!(entries[1].total_price, Some("150.00".parse().unwrap()));
    }
}
