pub mod entity;
pub mod invariants;

pub use entity::{
    calculate_net_pay, PayrollFilter, PayrollInput, PayrollPeriodTotal, PayrollRecord,
    PayrollTotals,
};
pub use invariants::validate_payroll_input;
