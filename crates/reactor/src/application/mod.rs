pub mod plan;
pub mod reactor;
pub mod settlement;

pub use reactor::{Reactor, ReactorCollaborators};
