//! # Hashed identity
//!
//! There is no retained widget tree, so a widget is recognised from one frame
//! to the next only by its `Id`: a hash of its label seeded with the id of the
//! scope it was declared in. Scopes nest through an [`IdStack`] whose bottom
//! entry is the owning window's own id.
//!
//! ```rust
//! use imframe_core::id::{IdStack, hash_str};
//!
//! let mut stack = IdStack::new(hash_str("Window", None, 0));
//! stack.push_str("row 3");
//! let ok = hash_str("OK", None, stack.top());
//! stack.pop();
//! assert_ne!(ok, hash_str("OK", None, stack.top()));
//! ```

use smallvec::SmallVec;

pub type Id = u32;

const CRC32_TABLE: [u32; 256] = crc32_table();

const fn crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut c = i as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[i] = c;
        i += 1;
    }
    table
}

/// CRC-32 of `bytes` continued from `seed`. Ids are persisted (window
/// settings are keyed by them), so the value must not depend on the process.
pub fn hash_bytes(bytes: &[u8], seed: Id) -> Id {
    let mut crc = !seed;
    for &b in bytes {
        crc = (crc >> 8) ^ CRC32_TABLE[((crc ^ u32::from(b)) & 0xFF) as usize];
    }
    // 0 is reserved for "no id"
    (!crc).max(1)
}

/// Hashes the byte range `[0, end)` of `label` (whole string when `end` is
/// `None`). An `end` past the string is clamped.
pub fn hash_str(label: &str, end: Option<usize>, seed: Id) -> Id {
    let bytes = label.as_bytes();
    let end = end.unwrap_or(bytes.len()).min(bytes.len());
    hash_bytes(&bytes[..end], seed)
}

pub fn hash_int(v: i64, seed: Id) -> Id {
    hash_bytes(&v.to_le_bytes(), seed)
}

/// Stack of accumulated hash seeds. Never empty: the bottom entry is the seed
/// the stack was created with.
#[derive(Clone, Debug)]
pub struct IdStack {
    seeds: SmallVec<[Id; 8]>,
}

impl IdStack {
    pub fn new(root: Id) -> Self {
        let mut seeds = SmallVec::new();
        seeds.push(root);
        Self { seeds }
    }

    pub fn top(&self) -> Id {
        // invariant: the root seed is never popped
        self.seeds[self.seeds.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.seeds.len()
    }

    pub fn push(&mut self, id: Id) {
        self.seeds.push(id);
    }

    pub fn push_str(&mut self, label: &str) -> Id {
        let id = hash_str(label, None, self.top());
        self.seeds.push(id);
        id
    }

    pub fn push_int(&mut self, v: i64) -> Id {
        let id = hash_int(v, self.top());
        self.seeds.push(id);
        id
    }

    pub fn pop(&mut self) {
        assert!(
            self.seeds.len() > 1,
            "IdStack::pop: more pops than pushes (the window seed cannot be popped)"
        );
        self.seeds.pop();
    }

    /// Drops everything above the root seed.
    pub fn truncate_to_root(&mut self) {
        self.seeds.truncate(1);
    }
}
