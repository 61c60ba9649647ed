//! # Snapshot Formats
//!
//! Decoding of catalog and ego-input snapshots, and encoding of produced
//! graphs. These are pure transformations over bytes; file and network I/O
//! live in the app layer.

mod json;

pub use json::{MAX_SNAPSHOT_SIZE, catalog_from_json, ego_input_from_json, graph_to_json};
