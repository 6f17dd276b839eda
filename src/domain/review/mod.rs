pub mod entity;
pub mod invariants;
pub mod state;

pub use entity::{
    PerformanceReview, ReviewEmployeeAggregate, ReviewFilter, ReviewInput, ReviewUpdate,
};
pub use invariants::{validate_rating, validate_review_input, validate_review_update};
pub use state::ReviewState;
