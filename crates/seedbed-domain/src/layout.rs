use camino::Utf8PathBuf;

/// Historical base seed. Changing it silently changes every generated byte,
/// so datasets written by older builds would stop verifying.
pub const DEFAULT_MASTER_SEED: u32 = 0xDEAD_BEEF;

/// Every data file is exactly 2 MiB.
pub const FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

pub const SUBS_PER_DIR: u32 = 10;
pub const LEAVES_PER_SUB: u32 = 10;
pub const FILES_PER_LEAF: u32 = 5;

/// Shape of a dataset tree: fan-out per level, file size, and the master seed
/// the per-file seeds are derived from.
///
/// `standard(size_gb)` carries the on-disk contract other tooling depends on:
/// `size_gb × 10 × 10 × 5` files of 2 MiB each, which makes the total size
/// exactly `size_gb` GiB by construction. Non-standard shapes exist so tests
/// can exercise generation and verification without writing gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLayout {
    pub top_dirs: u32,
    pub subs_per_dir: u32,
    pub leaves_per_sub: u32,
    pub files_per_leaf: u32,
    pub file_size: u64,
    pub master_seed: u32,
}

impl TreeLayout {
    #[must_use]
    pub fn standard(size_gb: u32) -> Self {
        Self {
            top_dirs: size_gb,
            subs_per_dir: SUBS_PER_DIR,
            leaves_per_sub: LEAVES_PER_SUB,
            files_per_leaf: FILES_PER_LEAF,
            file_size: FILE_SIZE_BYTES,
            master_seed: DEFAULT_MASTER_SEED,
        }
    }

    #[must_use]
    pub fn with_master_seed(mut self, master_seed: u32) -> Self {
        self.master_seed = master_seed;
        self
    }

    #[must_use]
    pub fn file_count(&self) -> u64 {
        u64::from(self.top_dirs)
            * u64::from(self.subs_per_dir)
            * u64::from(self.leaves_per_sub)
            * u64::from(self.files_per_leaf)
    }

    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.file_count() * self.file_size
    }

    /// Leaf directories in traversal order (`dir_<i>/sub_<j>/leaf_<k>`).
    pub fn leaf_dirs(&self) -> impl Iterator<Item = Utf8PathBuf> {
        let subs = self.subs_per_dir;
        let leaves = self.leaves_per_sub;
        (0..self.top_dirs).flat_map(move |dir| {
            (0..subs).flat_map(move |sub| {
                (0..leaves).map(move |leaf| Utf8PathBuf::from(format!("dir_{dir}/sub_{sub}/leaf_{leaf}")))
            })
        })
    }

    /// Every file position in traversal order: dir, then sub, then leaf, then
    /// file index, all ascending. Content never depends on this order; only
    /// progress reporting does.
    pub fn files(&self) -> impl Iterator<Item = FilePosition> {
        let subs = self.subs_per_dir;
        let leaves = self.leaves_per_sub;
        let per_leaf = self.files_per_leaf;
        (0..self.top_dirs).flat_map(move |dir| {
            (0..subs).flat_map(move |sub| {
                (0..leaves).flat_map(move |leaf| {
                    (0..per_leaf).map(move |index| FilePosition {
                        dir,
                        sub,
                        leaf,
                        index,
                    })
                })
            })
        })
    }
}

/// Position of one data file inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilePosition {
    pub dir: u32,
    pub sub: u32,
    pub leaf: u32,
    pub index: u32,
}

impl FilePosition {
    #[must_use]
    pub fn rel_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!(
            "dir_{}/sub_{}/leaf_{}/data_{}.bin",
            self.dir, self.sub, self.leaf, self.index
        ))
    }

    /// Per-file seed: the master seed XORed with the position encoded into
    /// one byte per level. Unique per position as long as every coordinate
    /// stays below 256; `dir` gets the top byte, so trees wider than 255
    /// top-level directories would alias into the `sub` byte.
    #[must_use]
    pub fn seed(&self, master_seed: u32) -> u32 {
        master_seed ^ (self.dir << 24) ^ (self.sub << 16) ^ (self.leaf << 8) ^ self.index
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn standard_layout_size_identity() {
        let layout = TreeLayout::standard(1);
        assert_eq!(layout.file_count(), 500);
        assert_eq!(layout.total_bytes(), 1_073_741_824);

        let layout = TreeLayout::standard(7);
        assert_eq!(layout.file_count(), 3500);
        assert_eq!(layout.total_bytes(), 7 * 1_073_741_824);
    }

    #[test]
    fn file_paths_follow_naming_scheme() {
        let layout = TreeLayout::standard(1);
        let first = layout.files().next().expect("first file");
        assert_eq!(first.rel_path(), "dir_0/sub_0/leaf_0/data_0.bin");

        let last = layout.files().last().expect("last file");
        assert_eq!(last.rel_path(), "dir_0/sub_9/leaf_9/data_4.bin");
    }

    #[test]
    fn traversal_order_is_nested_ascending() {
        let layout = TreeLayout {
            top_dirs: 2,
            subs_per_dir: 2,
            leaves_per_sub: 1,
            files_per_leaf: 2,
            file_size: 16,
            master_seed: DEFAULT_MASTER_SEED,
        };
        let paths: Vec<String> = layout.files().map(|p| p.rel_path().into_string()).collect();
        assert_eq!(
            paths,
            vec![
                "dir_0/sub_0/leaf_0/data_0.bin",
                "dir_0/sub_0/leaf_0/data_1.bin",
                "dir_0/sub_1/leaf_0/data_0.bin",
                "dir_0/sub_1/leaf_0/data_1.bin",
                "dir_1/sub_0/leaf_0/data_0.bin",
                "dir_1/sub_0/leaf_0/data_1.bin",
                "dir_1/sub_1/leaf_0/data_0.bin",
                "dir_1/sub_1/leaf_0/data_1.bin",
            ]
        );
    }

    #[test]
    fn leaf_dirs_cover_every_file_parent() {
        let layout = TreeLayout::standard(2);
        let leaves: HashSet<Utf8PathBuf> = layout.leaf_dirs().collect();
        assert_eq!(leaves.len(), 2 * 10 * 10);
        for file in layout.files() {
            let parent = file.rel_path().parent().expect("parent").to_path_buf();
            assert!(leaves.contains(&parent), "no leaf dir for {parent}");
        }
    }

    #[test]
    fn first_file_seed_equals_master_seed() {
        let position = FilePosition {
            dir: 0,
            sub: 0,
            leaf: 0,
            index: 0,
        };
        assert_eq!(position.seed(DEFAULT_MASTER_SEED), DEFAULT_MASTER_SEED);
        assert_eq!(position.seed(0x1234_5678), 0x1234_5678);
    }

    #[test]
    fn seed_encodes_one_byte_per_level() {
        let position = FilePosition {
            dir: 3,
            sub: 9,
            leaf: 1,
            index: 4,
        };
        assert_eq!(
            position.seed(DEFAULT_MASTER_SEED),
            DEFAULT_MASTER_SEED ^ 0x0309_0104
        );
    }

    #[test]
    fn seeds_are_unique_across_the_largest_supported_standard_tree() {
        let layout = TreeLayout::standard(10);
        let mut seen = HashSet::new();
        for file in layout.files() {
            assert!(
                seen.insert(file.seed(DEFAULT_MASTER_SEED)),
                "seed collision at {}",
                file.rel_path()
            );
        }
        assert_eq!(seen.len() as u64, layout.file_count());
    }
}
