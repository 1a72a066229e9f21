use serde::{Deserialize, Serialize};

use ordering_core::{
    Address, AggregateRoot, DomainError, DomainResult, Id, PositiveNumber, ValidationError,
    ValueObject,
};

/// The only discount code the pricing rules recognize.
pub const DISCOUNT20: &str = "DISCOUNT20";

/// Order line: product reference, quantity, unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    product_id: Id,
    quantity: PositiveNumber,
    price: PositiveNumber,
}

impl OrderLine {
    pub fn new(product_id: Id, quantity: PositiveNumber, price: PositiveNumber) -> Self {
        Self {
            product_id,
            quantity,
            price,
        }
    }

    pub fn product_id(&self) -> &Id {
        &self.product_id
    }

    pub fn quantity(&self) -> PositiveNumber {
        self.quantity
    }

    pub fn price(&self) -> PositiveNumber {
        self.price
    }

    /// `price * quantity`.
    pub fn subtotal(&self) -> Result<PositiveNumber, ValidationError> {
        self.price.multiply(self.quantity)
    }

    fn to_snapshot(&self) -> OrderLineSnapshot {
        OrderLineSnapshot {
            product_id: self.product_id.as_str().to_string(),
            quantity: self.quantity.value(),
            price: self.price.value(),
        }
    }

    fn from_snapshot(snapshot: OrderLineSnapshot) -> Result<Self, ValidationError> {
        Ok(Self {
            product_id: Id::from_raw(snapshot.product_id),
            quantity: PositiveNumber::create(snapshot.quantity)?,
            price: PositiveNumber::create(snapshot.price)?,
        })
    }
}

impl ValueObject for OrderLine {}

/// Promotional code attached to an order.
///
/// Codes outside the recognized set are kept verbatim so they survive a
/// load/save cycle, but they never change the total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscountCode {
    /// 20% off the order total.
    Discount20,
    Unrecognized(String),
}

impl DiscountCode {
    pub fn parse(code: impl Into<String>) -> Self {
        let code = code.into();
        match code.as_str() {
            DISCOUNT20 => DiscountCode::Discount20,
            _ => DiscountCode::Unrecognized(code),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DiscountCode::Discount20 => DISCOUNT20,
            DiscountCode::Unrecognized(code) => code,
        }
    }

    /// Factor applied to the undiscounted total, `None` when the code has no effect.
    pub fn multiplier(&self) -> Option<f64> {
        match self {
            DiscountCode::Discount20 => Some(0.8),
            DiscountCode::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.multiplier().is_some()
    }
}

impl ValueObject for DiscountCode {}

impl From<String> for DiscountCode {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl From<&str> for DiscountCode {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<DiscountCode> for String {
    fn from(value: DiscountCode) -> Self {
        match value {
            DiscountCode::Discount20 => DISCOUNT20.to_string(),
            DiscountCode::Unrecognized(code) => code,
        }
    }
}

impl core::fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status lifecycle: `Created -> Completed`, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[serde(alias = "created")]
    Created,
    #[serde(alias = "completed")]
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Created, OrderStatus::Completed)
        )
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATED" => Ok(OrderStatus::Created),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(ValidationError::new(format!("unknown order status: {other}"))),
        }
    }
}

/// Plain line item as stored and exchanged outside the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineSnapshot {
    pub product_id: String,
    pub quantity: f64,
    pub price: f64,
}

/// Behavior-free snapshot of an order, used by repositories and callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: String,
    pub items: Vec<OrderLineSnapshot>,
    pub shipping_address: String,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<DiscountCode>,
}

/// Aggregate root: Order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Id,
    items: Vec<OrderLine>,
    shipping_address: Address,
    status: OrderStatus,
    discount_code: Option<DiscountCode>,
}

impl Order {
    /// Create a brand-new order with a fresh id in status `Created`.
    pub fn create(
        items: Vec<OrderLine>,
        shipping_address: Address,
        discount_code: Option<DiscountCode>,
    ) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::new("order must have at least one item"));
        }

        Ok(Self {
            id: Id::new(),
            items,
            shipping_address,
            status: OrderStatus::Created,
            discount_code,
        })
    }

    /// Rebuild an order from a stored snapshot.
    ///
    /// Value objects are re-validated, but the "at least one item" creation rule
    /// is not: persisted orders are trusted to have passed it when created.
    pub fn from_snapshot(snapshot: OrderSnapshot) -> Result<Self, ValidationError> {
        let items = snapshot
            .items
            .into_iter()
            .map(OrderLine::from_snapshot)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: Id::from_raw(snapshot.id),
            items,
            shipping_address: Address::create(snapshot.shipping_address)?,
            status: snapshot.status,
            discount_code: snapshot.discount_code,
        })
    }

    pub fn to_snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id.as_str().to_string(),
            items: self.items.iter().map(OrderLine::to_snapshot).collect(),
            shipping_address: self.shipping_address.value().to_string(),
            status: self.status,
            discount_code: self.discount_code.clone(),
        }
    }

    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn discount_code(&self) -> Option<&DiscountCode> {
        self.discount_code.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Sum of line subtotals, reduced by the discount when the code is recognized.
    ///
    /// Always derived from the lines; nothing is cached on the aggregate.
    pub fn total(&self) -> Result<PositiveNumber, ValidationError> {
        let total = self
            .items
            .iter()
            .try_fold(PositiveNumber::ZERO, |acc, line| acc.add(line.subtotal()?))?;

        match self.discount_code.as_ref().and_then(DiscountCode::multiplier) {
            Some(factor) => total.multiply(PositiveNumber::create(factor)?),
            None => Ok(total),
        }
    }

    /// `Created -> Completed`. Fails for any other current status.
    pub fn complete(&mut self) -> DomainResult<()> {
        if self.status != OrderStatus::Created {
            return Err(DomainError::invariant(format!(
                "cannot complete an order with status: {}",
                self.status
            )));
        }

        self.status = OrderStatus::Completed;
        Ok(())
    }

    pub fn update_shipping_address(&mut self, address: Address) {
        self.shipping_address = address;
    }

    pub fn update_discount_code(&mut self, code: DiscountCode) {
        self.discount_code = Some(code);
    }

    /// Assign a status through the same state machine `complete()` enforces.
    ///
    /// Re-assigning the current status is a no-op.
    pub fn update_status(&mut self, status: OrderStatus) -> DomainResult<()> {
        if status == self.status {
            return Ok(());
        }
        if !self.status.can_transition_to(status) {
            return Err(DomainError::invariant(format!(
                "cannot change order status from {} to {}",
                self.status, status
            )));
        }

        self.status = status;
        Ok(())
    }
}

impl AggregateRoot for Order {
    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: f64, price: f64) -> OrderLine {
        OrderLine::new(
            Id::new(),
            PositiveNumber::create(quantity).unwrap(),
            PositiveNumber::create(price).unwrap(),
        )
    }

    fn address() -> Address {
        Address::create("123 Main St, Springfield, USA").unwrap()
    }

    fn two_lines() -> Vec<OrderLine> {
        vec![line(2.0, 3.0), line(1.0, 2.0)]
    }

    #[test]
    fn create_with_valid_fields_starts_in_created() {
        let items = two_lines();
        let order = Order::create(items.clone(), address(), Some(DiscountCode::Discount20)).unwrap();

        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(order.items(), items.as_slice());
        assert_eq!(order.shipping_address(), &address());
        assert_eq!(order.discount_code(), Some(&DiscountCode::Discount20));
        assert!(!order.id().as_str().is_empty());
    }

    #[test]
    fn create_without_items_is_rejected() {
        let err = Order::create(vec![], address(), None).unwrap_err();
        assert!(err.message().contains("must have at least one item"));
    }

    #[test]
    fn total_of_a_single_line() {
        let order = Order::create(vec![line(2.0, 3.0)], address(), None).unwrap();
        assert_eq!(order.total().unwrap().value(), 6.0);
    }

    #[test]
    fn total_of_multiple_lines() {
        let order = Order::create(two_lines(), address(), None).unwrap();
        assert_eq!(order.total().unwrap().value(), 8.0);
    }

    #[test]
    fn recognized_discount_reduces_the_total() {
        let order = Order::create(two_lines(), address(), Some(DiscountCode::Discount20)).unwrap();
        assert_eq!(order.total().unwrap().value(), 6.4);
        // Derived on every call; asking twice does not discount twice.
        assert_eq!(order.total().unwrap().value(), 6.4);
    }

    #[test]
    fn unrecognized_discount_is_stored_but_not_applied() {
        let code = DiscountCode::parse("SUMMER50");
        assert!(!code.is_recognized());

        let order = Order::create(two_lines(), address(), Some(code.clone())).unwrap();
        assert_eq!(order.total().unwrap().value(), 8.0);
        assert_eq!(order.to_snapshot().discount_code, Some(code));
    }

    #[test]
    fn complete_moves_created_to_completed() {
        let mut order = Order::create(two_lines(), address(), None).unwrap();
        order.complete().unwrap();
        assert!(order.is_completed());
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn completing_twice_fails_with_the_current_status() {
        let mut order = Order::create(vec![line(2.0, 3.0)], address(), None).unwrap();
        order.complete().unwrap();

        let err = order.complete().unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => {
                assert_eq!(msg, "cannot complete an order with status: COMPLETED")
            }
            other => panic!("Expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_exposes_plain_values() {
        let items = vec![line(2.0, 4.0)];
        let order = Order::create(items.clone(), address(), Some(DiscountCode::Discount20)).unwrap();

        let snapshot = order.to_snapshot();
        assert_eq!(snapshot.id, order.id().as_str());
        assert_eq!(
            snapshot.items,
            vec![OrderLineSnapshot {
                product_id: items[0].product_id().to_string(),
                quantity: 2.0,
                price: 4.0,
            }]
        );
        assert_eq!(snapshot.shipping_address, "123 Main St, Springfield, USA");
        assert_eq!(snapshot.status, OrderStatus::Created);
        assert_eq!(snapshot.discount_code, Some(DiscountCode::Discount20));
    }

    #[test]
    fn from_snapshot_rebuilds_an_identical_order() {
        let order = Order::create(vec![line(2.0, 4.0)], address(), Some(DiscountCode::Discount20)).unwrap();
        let rebuilt = Order::from_snapshot(order.to_snapshot()).unwrap();

        assert_eq!(rebuilt, order);
        assert_eq!(rebuilt.to_snapshot(), order.to_snapshot());
    }

    #[test]
    fn from_snapshot_accepts_an_empty_item_list() {
        let snapshot = OrderSnapshot {
            id: "legacy-1".to_string(),
            items: vec![],
            shipping_address: "Old Road 1".to_string(),
            status: OrderStatus::Completed,
            discount_code: None,
        };

        let order = Order::from_snapshot(snapshot).unwrap();
        assert!(order.items().is_empty());
        assert_eq!(order.total().unwrap().value(), 0.0);
    }

    #[test]
    fn from_snapshot_still_validates_value_objects() {
        let snapshot = OrderSnapshot {
            id: "bad".to_string(),
            items: vec![OrderLineSnapshot {
                product_id: "p".to_string(),
                quantity: -1.0,
                price: 1.0,
            }],
            shipping_address: "Somewhere".to_string(),
            status: OrderStatus::Created,
            discount_code: None,
        };
        assert!(Order::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn update_shipping_address_replaces_it() {
        let mut order = Order::create(vec![line(2.0, 4.0)], address(), None).unwrap();
        let new_address = Address::create("456 Elm St, Springfield, USA").unwrap();
        order.update_shipping_address(new_address.clone());
        assert_eq!(order.to_snapshot().shipping_address, new_address.value());
    }

    #[test]
    fn update_discount_code_replaces_it() {
        let mut order = Order::create(vec![line(2.0, 4.0)], address(), None).unwrap();
        order.update_discount_code(DiscountCode::parse("DISCOUNT20"));
        assert_eq!(order.to_snapshot().discount_code, Some(DiscountCode::Discount20));
    }

    #[test]
    fn update_status_allows_created_to_completed() {
        let mut order = Order::create(vec![line(2.0, 4.0)], address(), None).unwrap();
        order.update_status(OrderStatus::Completed).unwrap();
        assert_eq!(order.to_snapshot().status, OrderStatus::Completed);
    }

    #[test]
    fn update_status_to_the_same_status_is_a_no_op() {
        let mut order = Order::create(vec![line(2.0, 4.0)], address(), None).unwrap();
        order.update_status(OrderStatus::Created).unwrap();
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn update_status_cannot_reopen_a_completed_order() {
        let mut order = Order::create(vec![line(2.0, 4.0)], address(), None).unwrap();
        order.complete().unwrap();

        let err = order.update_status(OrderStatus::Created).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn snapshot_json_uses_camel_case_and_upper_case_status() {
        let order = Order::create(vec![line(1.0, 100.0)], address(), Some(DiscountCode::Discount20)).unwrap();
        let json = serde_json::to_value(order.to_snapshot()).unwrap();

        assert_eq!(json["status"], "CREATED");
        assert_eq!(json["discountCode"], "DISCOUNT20");
        assert_eq!(json["shippingAddress"], "123 Main St, Springfield, USA");
        assert_eq!(json["items"][0]["quantity"], 1.0);
        assert!(json["items"][0]["productId"].is_string());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("completed".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!("CREATED".parse::<OrderStatus>().unwrap(), OrderStatus::Created);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_line() -> impl Strategy<Value = OrderLineSnapshot> {
            ("[a-z0-9]{1,12}", 0u32..1000, 0u32..100_000).prop_map(|(product_id, qty, cents)| {
                OrderLineSnapshot {
                    product_id,
                    quantity: qty as f64,
                    price: cents as f64 / 100.0,
                }
            })
        }

        fn arb_discount() -> impl Strategy<Value = Option<DiscountCode>> {
            prop_oneof![
                Just(None),
                Just(Some(DiscountCode::Discount20)),
                "[A-Z0-9]{1,10}".prop_map(|c| Some(DiscountCode::parse(c))),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: from_snapshot(to_snapshot(o)) reproduces o's snapshot.
            #[test]
            fn snapshot_round_trip(
                lines in prop::collection::vec(arb_line(), 1..8),
                street in "[A-Za-z0-9][A-Za-z0-9 ,]{0,40}",
                discount in arb_discount(),
                completed in any::<bool>(),
            ) {
                let items = lines
                    .into_iter()
                    .map(|l| OrderLine::from_snapshot(l).unwrap())
                    .collect::<Vec<_>>();
                let mut order = Order::create(items, Address::create(&street).unwrap(), discount).unwrap();
                if completed {
                    order.complete().unwrap();
                }

                let snapshot = order.to_snapshot();
                let rebuilt = Order::from_snapshot(snapshot.clone()).unwrap();
                prop_assert_eq!(rebuilt.to_snapshot(), snapshot);
            }

            /// Property: a recognized discount never increases the total and
            /// an unrecognized one never changes it.
            #[test]
            fn discount_only_ever_reduces(
                lines in prop::collection::vec(arb_line(), 1..8),
                code in "[A-Z0-9]{1,10}",
            ) {
                let items = lines
                    .into_iter()
                    .map(|l| OrderLine::from_snapshot(l).unwrap())
                    .collect::<Vec<_>>();
                let address = Address::create("Main St").unwrap();

                let plain = Order::create(items.clone(), address.clone(), None).unwrap();
                let discounted = Order::create(items.clone(), address.clone(), Some(DiscountCode::Discount20)).unwrap();
                let other = DiscountCode::parse(code);
                let with_other = Order::create(items, address, Some(other.clone())).unwrap();

                let base = plain.total().unwrap().value();
                prop_assert!(discounted.total().unwrap().value() <= base);
                if !other.is_recognized() {
                    prop_assert_eq!(with_other.total().unwrap().value(), base);
                }
            }
        }
    }
}
