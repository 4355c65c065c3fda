//! An *interval map* associates every key of a totally ordered domain with a
//! value, but only stores the keys at which the associated value changes.
//! Memory use is proportional to the number of value transitions, not to the
//! size of the key domain, which makes it the right structure whenever large
//! ranges of neighboring keys share a value.
//!
//! This library provides an interval map implementation based on
//! [`btree-slab`](https://crates.io/crates/btree-slab)'s B-tree.
//!
//! ## Usage
//!
//! A map is created from a default value, initially associated to every key.
//! Half-open ranges of keys are then reassigned with
//! [`assign`](generic::IntervalMap::assign), and single keys looked up with
//! [`get`](generic::IntervalMap::get):
//!
//! ```
//! use btree_interval_map::IntervalMap;
//!
//! let mut map: IntervalMap<i32, char> = IntervalMap::new('-');
//! map.assign(2, 5, 'a');
//! assert_eq!(*map.get(&1), '-');
//! assert_eq!(*map.get(&2), 'a');
//! assert_eq!(*map.get(&4), 'a');
//! assert_eq!(*map.get(&5), '-');
//! ```
//!
//! The stored transition table is always *canonical*, the minimal table for
//! the assignment history: adjacent ranges with equal values are merged, and
//! ranges reassigned to the default value disappear entirely.
//!
//! ```
//! # use btree_interval_map::IntervalMap;
//! # let mut map: IntervalMap<i32, char> = IntervalMap::new('-');
//! map.assign(0, 4, 'a');
//! map.assign(4, 8, 'a'); // extends the previous range
//! assert_eq!(map.transition_count(), 2);
//!
//! map.assign(0, 8, '-'); // back to the default everywhere
//! assert!(map.is_empty());
//! ```
//!
//! Assigning an empty or inverted range is accepted and changes nothing:
//!
//! ```
//! # use btree_interval_map::IntervalMap;
//! # let mut map: IntervalMap<i32, char> = IntervalMap::new('-');
//! map.assign(7, 7, 'a');
//! map.assign(9, 3, 'a');
//! assert!(map.is_empty());
//! ```
//!
//! The key type only needs a total order ([`Ord`]), and the value type
//! equality and cloning ([`PartialEq`] + [`Clone`]). Lookups never fail and
//! an assignment introduces at most two new transitions, one per boundary.
pub mod generic;

#[cfg(feature = "serde")]
mod serde;

pub type DefaultContainer<K, V> = slab::Slab<btree_slab::generic::Node<K, V>>;

pub type IntervalMap<K, V> = generic::IntervalMap<K, V, DefaultContainer<K, V>>;
