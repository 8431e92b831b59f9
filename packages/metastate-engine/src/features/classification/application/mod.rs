/*
 * Classification Application Layer
 */

mod classifier;

pub use classifier::FieldClassifier;
