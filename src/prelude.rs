//! Prelude module that re-exports commonly used types.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use limitbook::prelude::*;
//! ```

// Core book types
pub use crate::book::{BookError, DEFAULT_MAX_PRICE, LimitOrderBook, SATOSHI};

// Order types
pub use crate::book::order::{Order, OrderId, Side};

// Fill relay types
pub use crate::book::fill::{Fill, FillListener};

// Depth view types
pub use crate::book::depth::DepthLevel;

// Utility functions
pub use crate::utils::current_time_millis;

// Type aliases
pub use crate::DefaultLimitOrderBook;
