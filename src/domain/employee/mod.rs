pub mod entity;
pub mod invariants;

pub use entity::Employee;
pub use invariants::normalize_employee_name;
