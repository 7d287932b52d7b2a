pub mod actions;
pub mod options;
pub mod resolve;
pub mod synth;
pub mod validate;
