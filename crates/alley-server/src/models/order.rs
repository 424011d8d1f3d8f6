//! Orders created at checkout.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Snapshot of one purchased product. The title is captured at checkout so
/// order history survives later product edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub products: Vec<OrderLine>,
    pub total_amount: BigDecimal,
    pub status: OrderStatus,
    pub payment_details: Option<PaymentDetails>,
    pub shipping_address: Option<ShippingAddress>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        user_id: Uuid,
        products: Vec<OrderLine>,
        total_amount: BigDecimal,
        payment_details: Option<PaymentDetails>,
        shipping_address: Option<ShippingAddress>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            products,
            total_amount,
            status: OrderStatus::Pending,
            payment_details,
            shipping_address,
            created_at: Utc::now(),
        }
    }
}
