pub mod parser;
pub mod scenario;
