//! Financials module - domain models, services, and traits.

mod financials_errors;
mod financials_model;
mod financials_service;
mod financials_traits;


pub use financials_errors::FinancialsError;
pub use financials_model::{
    FinancialPeriod, FinancialPeriodUpdate, NewFinancialPeriod, SofrRate,
};
pub use financials_service::FinancialPeriodService;
pub use financials_traits::{
    FinancialPeriodRepositoryTrait, FinancialPeriodServiceTrait, SofrRateSourceTrait,
};
