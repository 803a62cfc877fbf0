pub mod errors;
pub mod filter;
pub mod path_resolver;
pub mod query;
