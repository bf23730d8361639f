//! Test modules for meshquant-io
//!
//! Round trips through both formats plus the error paths of format detection and loading.
