pub mod history;
pub mod train_config;
pub mod trainer;

pub use history::{IterationStats, TrainingHistory};
pub use train_config::TrainConfig;
pub use trainer::{
    evaluate, mean_squared_error, train_with_early_stopping, EvaluationReport, StopReason,
    TrainingReport,
};
