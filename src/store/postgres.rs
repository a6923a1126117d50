use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::check::{Check, PaymentInput, PaymentType, ProductInput};
use crate::models::user::UserPublic;
use crate::query::{OrderBy, Page};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub uuid: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
}

impl UserRow {
    pub fn into_public(self) -> UserPublic {
        UserPublic {
            uuid: self.uuid,
            name: self.name,
            email: self.email,
        }
    }
}

/// One aggregated check row: products and payment come back as jsonb, totals
/// are recomputed in [`CheckRow::into_check`] the same way the engine derives
/// them at creation.
#[derive(Debug, sqlx::FromRow)]
pub struct CheckRow {
    pub uuid: Uuid,
    pub created_at: DateTime<Utc>,
    pub products: serde_json::Value,
    pub payment: serde_json::Value,
}

impl CheckRow {
    pub fn into_check(self) -> Result<Check, AppError> {
        let products: Vec<ProductInput> = serde_json::from_value(self.products)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
        let payment: PaymentInput = serde_json::from_value(self.payment)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
        Ok(Check::from_parts(
            self.uuid,
            self.created_at,
            products,
            payment,
        ))
    }
}

/// Typed filter set for the check listing — the only query surface the store
/// exposes, translated into SQL internally.
#[derive(Debug, Default)]
pub struct CheckFilters {
    pub search: Option<String>,
    pub created_at_before: Option<DateTime<Utc>>,
    pub created_at_after: Option<DateTime<Utc>>,
    pub total_gte: Option<i64>,
    pub total_lte: Option<i64>,
    pub payment_type: Option<PaymentType>,
}

const CHECK_SELECT: &str = "SELECT c.uuid, c.created_at, \
       jsonb_agg(jsonb_build_object('name', p.name, 'price', p.price, 'quantity', p.quantity)) AS products, \
       jsonb_build_object('type', pay.type, 'amount', pay.amount) AS payment, \
       SUM(p.price * p.quantity) AS total, \
       COALESCE(pay.amount, 0) - SUM(p.price * p.quantity) AS rest \
FROM checks c \
LEFT JOIN products p ON p.check_uuid = c.uuid \
LEFT JOIN payments pay ON pay.check_uuid = c.uuid";

const CHECK_GROUP_BY: &str = " GROUP BY c.uuid, c.created_at, pay.type, pay.amount";

/// Push the filtered, grouped check query (no ordering or paging) into `qb`.
/// Shared between the count and the page query so both see the same rows.
fn push_filtered(qb: &mut QueryBuilder<'_, Postgres>, user_uuid: Uuid, filters: &CheckFilters) {
    qb.push(CHECK_SELECT);
    qb.push(" WHERE c.user_uuid = ");
    qb.push_bind(user_uuid);
    if let Some(search) = &filters.search {
        qb.push(" AND p.name ILIKE ");
        qb.push_bind(format!("%{search}%"));
    }
    if let Some(ts) = filters.created_at_before {
        qb.push(" AND c.created_at <= ");
        qb.push_bind(ts);
    }
    if let Some(ts) = filters.created_at_after {
        qb.push(" AND c.created_at >= ");
        qb.push_bind(ts);
    }
    if let Some(payment_type) = filters.payment_type {
        qb.push(" AND pay.type = ");
        qb.push_bind(payment_type.as_str());
    }
    qb.push(CHECK_GROUP_BY);
    let mut separator = " HAVING ";
    if let Some(total_gte) = filters.total_gte {
        qb.push(separator);
        qb.push("SUM(p.price * p.quantity) >= ");
        qb.push_bind(total_gte as f64);
        separator = " AND ";
    }
    if let Some(total_lte) = filters.total_lte {
        qb.push(separator);
        qb.push("SUM(p.price * p.quantity) <= ");
        qb.push_bind(total_lte as f64);
    }
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    // -- User Operations --

    pub async fn create_user(
        &self,
        name: &str,
        email: Option<&str>,
        hashed_password: &str,
    ) -> Result<UserPublic, AppError> {
        let mut tx = self.pool.begin().await?;
        if let Some(email) = email {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
            )
            .bind(email)
            .fetch_one(&mut *tx)
            .await?;
            if exists {
                return Err(AppError::UserAlreadyExists);
            }
        }

        let uuid = Uuid::new_v4();
        sqlx::query("INSERT INTO users (uuid, name, email, hashed_password) VALUES ($1, $2, $3, $4)")
            .bind(uuid)
            .bind(name)
            .bind(email)
            .bind(hashed_password)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(UserPublic {
            uuid,
            name: name.to_string(),
            email: email.map(String::from),
        })
    }

    pub async fn get_user(&self, uuid: Uuid) -> Result<Option<UserPublic>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT uuid, name, email, hashed_password FROM users WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(UserRow::into_public))
    }

    /// Full row incl. the password digest — login path only.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT uuid, name, email, hashed_password FROM users WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Partial update; absent fields keep their current value.
    pub async fn update_user(
        &self,
        uuid: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserPublic>, sqlx::Error> {
        sqlx::query(
            "UPDATE users SET name = COALESCE($2, name), email = COALESCE($3, email), \
             updated_at = NOW() WHERE uuid = $1",
        )
        .bind(uuid)
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await?;
        self.get_user(uuid).await
    }

    // -- Check Operations --

    /// Persist a validated check atomically: check row, every product row and
    /// the payment row commit together or not at all.
    pub async fn create_check(&self, user_uuid: Uuid, check: &Check) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO checks (uuid, user_uuid, created_at) VALUES ($1, $2, $3)")
            .bind(check.uuid)
            .bind(user_uuid)
            .bind(check.created_at)
            .execute(&mut *tx)
            .await?;

        for product in &check.products {
            sqlx::query(
                "INSERT INTO products (uuid, check_uuid, name, price, quantity) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(check.uuid)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.quantity)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO payments (uuid, check_uuid, type, amount) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(check.uuid)
        .bind(check.payment.r#type.as_str())
        .bind(check.payment.amount)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Filtered, ordered page of a user's checks plus the total row count
    /// before slicing.
    pub async fn get_checks(
        &self,
        user_uuid: Uuid,
        filters: &CheckFilters,
        order: &[OrderBy],
        page: Page,
    ) -> Result<(i64, Vec<CheckRow>), sqlx::Error> {
        let mut count_qb = QueryBuilder::new("SELECT count(*) FROM (");
        push_filtered(&mut count_qb, user_uuid, filters);
        count_qb.push(") AS filtered");
        let total_count: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::new("");
        push_filtered(&mut qb, user_uuid, filters);
        qb.push(" ORDER BY ");
        for (i, order_by) in order.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(order_by.field.sql());
            if order_by.descending {
                qb.push(" DESC");
            }
        }
        qb.push(" LIMIT ");
        qb.push_bind(page.page_size);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let rows = qb
            .build_query_as::<CheckRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok((total_count, rows))
    }

    /// Single aggregated check. `user_uuid` scopes the lookup to an owner;
    /// `None` is the unauthenticated client view.
    pub async fn get_check(
        &self,
        check_uuid: Uuid,
        user_uuid: Option<Uuid>,
    ) -> Result<Option<CheckRow>, sqlx::Error> {
        let mut qb = QueryBuilder::new("");
        qb.push(CHECK_SELECT);
        qb.push(" WHERE c.uuid = ");
        qb.push_bind(check_uuid);
        if let Some(user_uuid) = user_uuid {
            qb.push(" AND c.user_uuid = ");
            qb.push_bind(user_uuid);
        }
        qb.push(CHECK_GROUP_BY);
        qb.build_query_as::<CheckRow>()
            .fetch_optional(&self.pool)
            .await
    }
}
