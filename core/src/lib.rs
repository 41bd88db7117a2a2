//! # LAMBDAPI CORE LIBRARY
//!
//! **HTTP-STYLE ROUTING FOR SERVERLESS FUNCTION INVOCATIONS**
//!
//! **ARCHITECTURE**: Event adapters normalize platform payloads, a route table
//! dispatches them through per-method middleware chains, and serializers wrap
//! the response in the envelope the invoking platform expects
//! **GUARANTEE**: Every invocation produces a response; handler errors and
//! panics surface as error statuses

pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod event;
pub mod middleware;
pub mod request;
pub mod response;
pub mod routing;
pub mod schema;
