use tracing::instrument;

use ordering_core::{Address, AggregateRoot, DomainError, Id, PositiveNumber};
use ordering_orders::{Order, OrderLine, OrderRepository, OrderSnapshot};

use crate::error::UseCaseError;
use crate::request::{CreateOrderRequest, UpdateOrderRequest};

const ORDER: &str = "order";

/// Order use cases.
///
/// Orchestrates: plain request → aggregate → repository → plain result.
/// Holds no state between calls besides the injected repository. Each
/// operation is a straight sequence of repository calls; nothing guards the
/// window between `find_by_id` and `save`, so concurrent writers to one order
/// are last-write-wins.
pub struct OrderUseCase<R> {
    repo: R,
}

impl<R> OrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    #[instrument(skip(self, request), fields(items = request.items.len()), err)]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<String, UseCaseError> {
        let lines = request
            .items
            .into_iter()
            .map(|item| {
                Ok(OrderLine::new(
                    Id::from_raw(item.product_id),
                    PositiveNumber::create(item.quantity)?,
                    PositiveNumber::create(item.price)?,
                ))
            })
            .collect::<Result<Vec<_>, UseCaseError>>()?;

        let address = Address::create(&request.shipping_address)?;
        let order = Order::create(lines, address, request.discount_code)?;
        let total = order.total()?;

        self.repo.save(&order).await?;

        tracing::info!(order_id = %order.id(), %total, "order created");
        Ok(format!("Order created with total: {total}"))
    }

    #[instrument(skip(self, request), fields(order_id = %request.id), err)]
    pub async fn update_order(&self, request: UpdateOrderRequest) -> Result<String, UseCaseError> {
        let mut order = self.load(&Id::from_raw(request.id)).await?;

        // Blank fields count as absent and leave the stored value alone.
        if let Some(address) = request.shipping_address.filter(|s| !s.trim().is_empty()) {
            order.update_shipping_address(Address::create(address)?);
        }
        if let Some(status) = request.status {
            order.update_status(status)?;
        }
        if let Some(code) = request.discount_code.filter(|c| !c.as_str().trim().is_empty()) {
            if !code.is_recognized() {
                tracing::debug!(code = %code, "storing discount code with no pricing effect");
            }
            order.update_discount_code(code);
        }

        self.repo.save(&order).await?;

        tracing::info!(order_id = %order.id(), status = %order.status(), "order updated");
        Ok(format!("Order updated. New status: {}", order.status()))
    }

    #[instrument(skip(self), err)]
    pub async fn get_all_orders(&self) -> Result<Vec<OrderSnapshot>, UseCaseError> {
        let orders = self.repo.find_all().await?;
        Ok(orders.iter().map(Order::to_snapshot).collect())
    }

    #[instrument(skip(self), err)]
    pub async fn complete_order(&self, id: &str) -> Result<String, UseCaseError> {
        let mut order = self.load(&Id::from_raw(id)).await?;

        order.complete()?;
        self.repo.save(&order).await?;

        tracing::info!(order_id = %order.id(), "order completed");
        Ok(format!("Order with id {} completed", order.id()))
    }

    #[instrument(skip(self), err)]
    pub async fn delete_order(&self, id: &str) -> Result<String, UseCaseError> {
        let order = self.load(&Id::from_raw(id)).await?;

        self.repo.delete(order.id()).await?;

        tracing::info!(order_id = %order.id(), "order deleted");
        Ok("Order deleted".to_string())
    }

    async fn load(&self, id: &Id) -> Result<Order, UseCaseError> {
        match self.repo.find_by_id(id).await? {
            Some(order) => Ok(order),
            None => Err(DomainError::not_found(ORDER, id.as_str()).into()),
        }
    }
}
