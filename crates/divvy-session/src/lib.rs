//! # divvy-session: Session Layer for Divvy
//!
//! One mutable bill-splitting session on top of the pure
//! [`divvy_core`] crate.
//!
//! The adapter (browser frontend, test harness, anything else) talks
//! to a [`Session`]: it applies mutations, calls
//! [`Session::recompute`] after each one, and renders the returned
//! [`AllocationResult`](divvy_core::engine::AllocationResult). Hosts
//! whose command layer runs concurrently wrap it in [`SessionState`].
//!
//! ## Example
//! ```rust
//! use divvy_core::amount::{Amount, Weight};
//! use divvy_session::Session;
//!
//! let mut session = Session::new(); // bootstraps with "Friend 1"
//! let alice = session.registry().list()[0].id;
//! let bob = session.add_participant(Some("Bob"));
//!
//! let pizza = session.add_item("Pizza", Amount::from_value(18.0));
//! session.set_weight(pizza, alice, Weight::from_value(50.0));
//! session.set_weight(pizza, bob, Weight::from_value(50.0));
//!
//! let result = session.recompute();
//! assert_eq!(result.payout(alice), 9.0);
//! assert_eq!(result.payout(bob), 9.0);
//! ```

pub mod session;
pub mod state;

pub use session::Session;
pub use state::SessionState;
