//! Exercise services: the two query builders and the verification engine.
//!
//! `vulnerable` splices raw input into SQL text; `secure` binds the same input
//! as parameters. Both sides of a route pair are expected to return equivalent
//! results for well-formed legitimate input.

pub mod secure;
pub mod verification;
pub mod vulnerable;
