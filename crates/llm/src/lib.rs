//! External text-generation collaborator.
//!
//! The generator is treated as an opaque text-completion service: prompt
//! parts in, unstructured natural-language text out. It may fail (network,
//! quota, content policy) and gives no guarantee on content correctness;
//! callers own retry and timeout policy.

pub mod backends;
pub mod generator;

pub use backends::create_generator;
pub use generator::{GenerationError, GenerationParams, Message, Role, TextGenerator};
