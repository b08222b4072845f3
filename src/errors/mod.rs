//! Error trees, codes, and message rendering
//!
//! Every failed filter produces an [`ErrorAtom`]; composite filters collect
//! them into [`ErrorHash`] and [`ErrorArray`] nodes that mirror the shape of
//! the input record. Rendering those trees into prose is delegated to a
//! [`MessageRenderer`].

pub mod messages;
pub mod node;

pub use messages::{DefaultMessages, MessageRenderer};
pub use node::{ErrorArray, ErrorAtom, ErrorCode, ErrorContext, ErrorHash, ErrorNode};
