use std::sync::RwLock;

use ordering_core::{AggregateRoot, Id};
use ordering_orders::{Order, OrderRepository, OrderSnapshot, RepositoryError};

/// In-memory order repository.
///
/// Stores snapshots (not live aggregates) in insertion order, so every load
/// goes through `Order::from_snapshot` exactly like a real backend.
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<OrderSnapshot>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.orders.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    fn rebuild(snapshot: OrderSnapshot) -> Result<Order, RepositoryError> {
        let id = snapshot.id.clone();
        Order::from_snapshot(snapshot).map_err(|e| RepositoryError::CorruptRecord {
            id,
            reason: e.to_string(),
        })
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let snapshots = self.orders.read().map_err(|_| poisoned())?.clone();
        snapshots.into_iter().map(Self::rebuild).collect()
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<Order>, RepositoryError> {
        let found = self
            .orders
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .find(|s| s.id == id.as_str())
            .cloned();

        found.map(Self::rebuild).transpose()
    }

    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let snapshot = order.to_snapshot();
        let mut orders = self.orders.write().map_err(|_| poisoned())?;

        match orders.iter_mut().find(|s| s.id == order.id().as_str()) {
            Some(existing) => *existing = snapshot,
            None => orders.push(snapshot),
        }
        Ok(())
    }

    async fn delete(&self, id: &Id) -> Result<(), RepositoryError> {
        self.orders
            .write()
            .map_err(|_| poisoned())?
            .retain(|s| s.id != id.as_str());
        Ok(())
    }
}
