pub mod trust_analytics;
pub mod trust_calculator;
pub mod validation;

pub use trust_analytics::{
    TenantTrustSummary, TrustAnalytics, TrustAnalyticsService, TrustHistoryPoint,
};
pub use trust_calculator::TrustScoreCalculator;
pub use validation::ValidationWorkflow;
