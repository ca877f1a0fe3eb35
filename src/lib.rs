//! Portunus: team/project/stage environment variable console.
//!
//! The library holds the pieces the console binary and the tests share: the entity model,
//! the hierarchy selection store, the key/value delta engine, the request plumbing and the
//! remote client.

pub mod console;
pub mod hierarchy;
pub mod kv;
pub mod model;
pub mod remote;
pub mod request;
pub mod session;
