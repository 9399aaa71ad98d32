//! Library components of the FCPX Kit CLI.

pub mod logging;
