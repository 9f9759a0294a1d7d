// Service exports
pub mod classifier;

pub use classifier::{Classifier, ClassifierError, HttpClassifier};
