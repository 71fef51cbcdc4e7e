pub mod dataset;

pub use dataset::{load_dataset, Dataset, DatasetError};
