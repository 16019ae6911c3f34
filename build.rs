//! Build script for Trellis.
//!
//! Currently a no-op placeholder. The google.rpc status-detail types are
//! implemented directly in Rust (see src/rpc/details.rs) rather than
//! generated from protobuf definitions.
//!
//! This approach was chosen because:
//! - It avoids proto file dependencies and build-time codegen complexity
//! - The detail-block surface consumed by the classifier is a stable subset
//! - Request and response payloads stay opaque to this crate, so there is
//!   nothing else to generate
//!
//! If proto-based codegen is needed in the future, tonic-build can be
//! configured here to compile proto files from a `proto/` directory.

fn main() {
    // Rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
