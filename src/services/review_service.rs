// src/services/review_service.rs
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::{PerformanceReview, ReviewEmployeeAggregate, ReviewFilter};
use crate::error::AppResult;
use crate::repositories::ReviewRepository;

/// Reviews matching a filter together with their per-employee aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListing {
    pub items: Vec<PerformanceReview>,
    pub aggregates: Vec<ReviewEmployeeAggregate>,
}

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub fn list_with_aggregates(&self, filter: &ReviewFilter) -> AppResult<ReviewListing> {
        let items = self.reviews.list(filter)?;
        let aggregates = self.reviews.aggregate(filter)?;

        debug!(
            "Listed {} reviews across {} employees",
            items.len(),
            aggregates.len()
        );
        Ok(ReviewListing { items, aggregates })
    }
}
