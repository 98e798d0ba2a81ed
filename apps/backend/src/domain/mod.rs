//! Pure domain rules, free of HTTP and database concerns.

pub mod policy;
