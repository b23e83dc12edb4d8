//! Container sessions
//!
//! A session owns one running container started from a release image:
//! - acquired with [`ContainerSession::acquire`], which reports a missing
//!   image separately from other startup failures
//! - used for shell execs and image metadata reads
//! - stopped and removed when released or dropped, on every exit path

mod session;

pub use session::ContainerSession;
