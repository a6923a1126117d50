//! Check domain model and the consistency rules that keep its financial
//! totals honest. Pure validation/derivation — no I/O lives here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    #[default]
    Cash,
    Cashless,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "CASH",
            PaymentType::Cashless => "CASHLESS",
        }
    }
}

/// Raw product line as submitted by the client (and as stored).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub quantity: f64,
}

/// Raw payment as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    #[serde(rename = "type", default)]
    pub r#type: PaymentType,
    pub amount: f64,
}

/// Product line with its derived total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub quantity: f64,
    pub total: f64,
}

impl Product {
    fn from_input(input: ProductInput) -> Self {
        let total = input.price * input.quantity;
        Self {
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "type")]
    pub r#type: PaymentType,
    pub amount: f64,
}

/// A recorded purchase: products, one payment, derived totals. Immutable
/// after creation — there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub uuid: Uuid,
    pub created_at: DateTime<Utc>,
    pub products: Vec<Product>,
    pub payment: Payment,
    pub total: f64,
    pub rest: f64,
}

impl Check {
    /// Validate raw inputs and derive totals. Rejection order matters: an
    /// empty product list is reported before any amount check.
    pub fn build(
        uuid: Uuid,
        created_at: DateTime<Utc>,
        products: Vec<ProductInput>,
        payment: PaymentInput,
    ) -> Result<Check, AppError> {
        if products.is_empty() {
            return Err(AppError::ProductListEmpty);
        }
        for product in &products {
            if !(product.quantity > 0.0) {
                return Err(AppError::Validation(format!(
                    "product '{}' quantity must be positive",
                    product.name
                )));
            }
        }
        let check = Check::from_parts(uuid, created_at, products, payment);
        if check.rest < 0.0 {
            return Err(AppError::NotEnoughMoney);
        }
        if check.total < 1.0 {
            return Err(AppError::EmptyCheck);
        }
        Ok(check)
    }

    /// Derive totals without validating — for rows already persisted, whose
    /// invariants were enforced at creation.
    pub fn from_parts(
        uuid: Uuid,
        created_at: DateTime<Utc>,
        products: Vec<ProductInput>,
        payment: PaymentInput,
    ) -> Check {
        let products: Vec<Product> = products.into_iter().map(Product::from_input).collect();
        let total: f64 = products.iter().map(|p| p.total).sum();
        let rest = payment.amount - total;
        Check {
            uuid,
            created_at,
            products,
            payment: Payment {
                r#type: payment.r#type,
                amount: payment.amount,
            },
            total,
            rest,
        }
    }
}
