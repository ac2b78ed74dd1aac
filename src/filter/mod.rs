//! Filter facade
//!
//! Parses a filter string once, keeps any parse error as a message instead
//! of failing, and evaluates test cases with the fast filter when one was
//! compiled, falling back to the expression tree otherwise.

pub mod cache;
mod options;
mod test_case;
mod wrapper;

pub use cache::get_or_parse;
pub use options::*;
pub use test_case::*;
pub use wrapper::*;
