// Report building on top of the domain engines
pub mod analytics;

// Seedable data generators
pub mod simulation;
