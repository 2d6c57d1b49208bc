mod layout;

pub use layout::{
    FilePosition, TreeLayout, DEFAULT_MASTER_SEED, FILES_PER_LEAF, FILE_SIZE_BYTES,
    LEAVES_PER_SUB, SUBS_PER_DIR,
};
