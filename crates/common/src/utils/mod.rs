/// Hexadecimal encoding utilities.
pub mod hex;

/// Integer manipulation and formatting utilities.
pub mod integers;

/// Input/output utilities for file manipulation.
pub mod io;

/// Time manipulation and formatting utilities.
pub mod time;
