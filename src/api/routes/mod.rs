//! Route groups, one `impl RevoltClient` block per API area.

pub mod account;
pub mod invites;
pub mod sync;
pub mod users;
