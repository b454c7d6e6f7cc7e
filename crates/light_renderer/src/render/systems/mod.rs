//! Rendering systems built on the collaborator interfaces

pub mod lighting;
