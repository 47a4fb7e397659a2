pub mod materialize;
pub mod resolve;
