//! Contains subcommands for the morph node.

mod node;
pub use node::NodeCommand;
