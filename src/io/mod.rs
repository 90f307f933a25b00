pub mod delimited;
pub mod xlsx;
