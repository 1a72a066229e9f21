use serde::Deserialize;

use ordering_orders::{DiscountCode, OrderStatus};

/// One requested line: raw product id, quantity and unit price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_address: String,
    #[serde(default)]
    pub discount_code: Option<DiscountCode>,
}

/// Partial update; every field besides `id` is optional and applied independently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub discount_code: Option<DiscountCode>,
}

impl UpdateOrderRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shipping_address: None,
            status: None,
            discount_code: None,
        }
    }
}
