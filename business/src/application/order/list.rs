use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::list::{ListOrdersParams, ListOrdersUseCase};

pub struct ListOrdersUseCaseImpl {
    pub repository: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListOrdersUseCase for ListOrdersUseCaseImpl {
    async fn execute(&self, params: ListOrdersParams) -> Result<Vec<Order>, OrderError> {
        self.logger
            .info(&format!("Getting orders for user: {}", params.user_id));

        let orders = self
            .repository
            .get_all(&params.user_id)
            .await
            .map_err(OrderError::Fetch)?;

        self.logger.info(&format!(
            "Found {} orders for user {}",
            orders.len(),
            params.user_id
        ));
        Ok(orders)
    }
}
