mod assembler;
mod auth;
mod library;

pub use assembler::AssemblyState;
pub use assembler::PlaylistAssembler;
pub use auth::TokenManager;
pub use library::TrackLibrary;
