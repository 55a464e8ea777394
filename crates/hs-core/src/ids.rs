//! Strongly typed identifier wrappers.
//!
//! Ids are dense indices handed out in insertion order, so they double as
//! `Vec` indices through `.index()`.  String keys from map and settings files
//! are translated to ids once, at load time.

use std::fmt;

use crate::{CoreError, CoreResult};

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid id".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Id for the `n`-th element of a dense collection.
            pub fn from_index(n: usize) -> CoreResult<$name> {
                <$inner>::try_from(n)
                    .ok()
                    .filter(|&v| v != <$inner>::MAX)
                    .map($name)
                    .ok_or(CoreError::IdOverflow { what: stringify!($name), count: n })
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a graph node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed graph edge, in CSR order.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a participant in the world's participant store.
    pub struct ParticipantId(u32);
}
