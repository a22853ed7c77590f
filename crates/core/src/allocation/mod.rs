//! Allocation module - the year-end two-tier allocation engine.

mod allocation_calculator;
mod allocation_errors;
mod allocation_model;
mod allocation_service;
mod allocation_traits;



pub use allocation_calculator::{calculate_allocations, effective_return_rate};
pub use allocation_errors::AllocationError;
pub use allocation_model::{AllocationInput, AllocationRun, MemberAllocation};
pub use allocation_service::AllocationService;
pub use allocation_traits::{AllocationRepositoryTrait, AllocationServiceTrait};
