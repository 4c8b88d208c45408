//! Node-level glue around the DA includer: height views over the node's stores, polling
//! helpers, identity bootstrap and service wiring.

pub mod heights;
pub mod identity;
pub mod services;
pub mod wait;

pub use heights::{HeightSource, HeightView, HeightViewError, NodeHeights, NodeKind};
pub use identity::{init_files, load_or_gen_node_key, IdentityError, NodeKey};
pub use services::{init_logging, open_metadata_db, start_da_includer};
pub use wait::{
    wait_for_at_least_n_blocks, wait_for_at_least_n_da_included_height, wait_for_first_block,
    wait_for_first_da_included_height, PollConfig, WaitError,
};
