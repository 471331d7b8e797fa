pub mod completion;
pub mod envelope;
pub mod mcq;
