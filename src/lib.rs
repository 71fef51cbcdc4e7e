pub mod math;
pub mod activation;
pub mod data;
pub mod error;
pub mod network;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::Activation;
pub use data::dataset::{load_dataset, Dataset, DatasetError};
pub use error::Error;
pub use network::network::Network;
pub use network::topology::Topology;
pub use train::history::{IterationStats, TrainingHistory};
pub use train::train_config::TrainConfig;
pub use train::trainer::{
    evaluate, mean_squared_error, train_with_early_stopping, EvaluationReport, StopReason,
    TrainingReport,
};
