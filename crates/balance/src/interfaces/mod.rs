mod args;
mod reporter;
mod result;

// re-export the public interface
pub use args::*;
pub use reporter::*;
pub use result::*;
