//! Shopping carts.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line in a cart. The price is copied from the product at add time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// A user's cart, created lazily on first access.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            items: Vec::new(),
        }
    }

    /// Adds a quantity of a product, merging into an existing line.
    pub fn add(&mut self, product_id: Uuid, quantity: i32, price: BigDecimal) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem {
                product_id,
                quantity,
                price,
            });
        }
    }

    /// Sum of price times quantity over all lines.
    pub fn total(&self) -> BigDecimal {
        self.items.iter().fold(BigDecimal::from(0), |acc, item| {
            acc + &item.price * BigDecimal::from(item.quantity)
        })
    }
}
