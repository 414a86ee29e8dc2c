//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing shop and product IDs.

use thiserror::Error;

/// Every ID above the current maximum is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no {kind} left after {last}")]
pub struct IdsExhausted {
    /// Name of the ID type.
    pub kind: &'static str,
    /// The largest ID in use.
    pub last: i32,
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `next_after()` for `max(existing) + 1` assignment, failing with
///   `IdsExhausted` past `i32::MAX`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use shop_inventory_core::define_id;
/// define_id!(ShelfId);
/// define_id!(BinId);
///
/// let shelf_id = ShelfId::new(1);
/// let bin_id = BinId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = bin_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// The ID handed out when no IDs exist yet.
            pub const FIRST: Self = Self(1);

            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// The ID following the largest of `existing`, or [`Self::FIRST`]
            /// when `existing` is empty.
            ///
            /// # Errors
            ///
            /// Returns `IdsExhausted` when the largest ID is `i32::MAX`.
            pub fn next_after<I>(existing: I) -> Result<Self, $crate::IdsExhausted>
            where
                I: IntoIterator<Item = Self>,
            {
                match existing.into_iter().max() {
                    None => Ok(Self::FIRST),
                    Some(max) => max.0.checked_add(1).map(Self).ok_or($crate::IdsExhausted {
                        kind: stringify!($name),
                        last: max.0,
                    }),
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ShopId);
define_id!(ProductId);
