//! Workflows that connect an editing session to the template service.
//!
//! ARCHITECTURE
//! ============
//! The designer core is synchronous and never performs I/O. Service modules
//! own the async steps (load, save, render) and translate between the
//! service's records and the session's documents.

pub mod template;
