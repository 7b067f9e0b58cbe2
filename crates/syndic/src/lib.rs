//! Top-level facade crate for syndic.
//!
//! Re-exports the core types and the reconciler library so users can depend
//! on a single crate.

pub mod core {
    pub use syndic_core::*;
}

pub mod apply {
    pub use syndic_apply::*;
}
