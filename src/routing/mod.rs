//! Routing module
//!
//! Path patterns with `{name}` placeholders and the ordered route table that
//! resolves a request path to its handler:
//! - Literal segments compare exactly
//! - Placeholders capture one non-empty segment
//! - The first registered route that matches wins

mod params;
mod pattern;
mod table;

pub use params::Params;
pub use pattern::PathPattern;
pub use table::{HandlerBinding, Route, RouteTable};
