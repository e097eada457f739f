//! Economy layer - stockpile, production formulas and daily processing

pub mod ledger;
pub mod production;
pub mod stockpile;

pub use ledger::{DailyLedger, Economy, EconomyReport, EconomySummary, ProductionSite, WorkerPlan};
pub use production::{
    calculate_efficiency, predict_shortage, Consumption, ProductionKind, ProductionTable,
    ShortageForecast,
};
pub use stockpile::{ResourceAmounts, ResourceType, Stockpile};
