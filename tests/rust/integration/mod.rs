//! Integration tests - Drive the HTTP router end to end
//!
//! The router is exercised in-process with `tower::ServiceExt::oneshot`, so no
//! socket is bound.

mod server_routes_tests;
