use btree_slab::generic::{
	map::{BTreeExt, BTreeExtMut, BTreeMap},
	node::{Address, Item, Node},
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};

/// A map associating every key of a totally ordered domain `K` to a value of
/// `V`, stored in memory proportional to the number of value *transitions*
/// rather than the number of keys.
///
/// The map owns a default value, fixed at construction, and an ordered table
/// of transitions. A transition `(k, v)` means that keys from `k` (included)
/// up to the next transition key (excluded) are associated to `v`; keys
/// below the first transition are associated to the default value.
///
/// The table is kept *canonical*: two adjacent transitions never carry equal
/// values, and the first transition never carries the default value. This
/// makes the representation minimal for any assignment history.
#[derive(Clone)]
pub struct IntervalMap<K, V, C> {
	default: V,
	btree: BTreeMap<K, V, C>,
}

impl<K, V, C> IntervalMap<K, V, C> {
	/// Create a new map associating `default` to every key.
	pub fn new(default: V) -> IntervalMap<K, V, C>
	where
		C: Default,
	{
		IntervalMap {
			default,
			btree: BTreeMap::new(),
		}
	}

	/// The value associated to every key not covered by a transition.
	pub fn default_value(&self) -> &V {
		&self.default
	}

	/// The underlying transition table.
	pub fn transitions(&self) -> &BTreeMap<K, V, C> {
		&self.btree
	}

	/// The underlying transition table, mutably. Modify at your own risk:
	/// nothing restores canonical form behind a direct mutation.
	pub fn transitions_mut(&mut self) -> &mut BTreeMap<K, V, C> {
		&mut self.btree
	}
}

impl<K, V: Default, C: Default> Default for IntervalMap<K, V, C> {
	fn default() -> Self {
		Self::new(V::default())
	}
}

impl<K, V, C: SimpleCollectionRef + Slab<Node<K, V>>> IntervalMap<K, V, C> {
	/// Number of stored transitions.
	pub fn transition_count(&self) -> usize {
		self.btree.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transition_count() == 0
	}

	/// Returns the value associated to the given key.
	///
	/// This is the value of the transition with the greatest key at or below
	/// `key`, or the default value if every transition lies above `key`.
	/// Runs in O(log n). The returned reference is invalidated by any
	/// subsequent mutation of the map.
	pub fn get(&self, key: &K) -> &V
	where
		K: Ord,
	{
		match self.governing_address(key, false) {
			Some(addr) => self.btree.item(addr).unwrap().value(),
			None => &self.default,
		}
	}

	/// Address of the transition governing `key`: the item with the greatest
	/// key at or below `key`, or strictly below it if `strict` is set.
	///
	/// Descends from the root, remembering the governing item of each
	/// visited internal node, and resolves in the leaf the descent ends in.
	fn governing_address(&self, key: &K, strict: bool) -> Option<Address>
	where
		K: Ord,
	{
		let mut id = self.btree.root_id()?;
		let mut governing = None;

		loop {
			match self.btree.node(id) {
				Node::Internal(node) => {
					let branches = node.branches();
					match binary_search_governing(branches, key, strict) {
						Some(i) => {
							governing = Some(Address::new(id, i.into()));
							id = branches[i].child
						}
						None => id = node.first_child_id(),
					}
				}
				Node::Leaf(leaf) => {
					return match binary_search_governing(leaf.items(), key, strict) {
						Some(i) => Some(Address::new(id, i.into())),
						None => governing,
					}
				}
			}
		}
	}

	/// Leaf address at which a transition with the given key would be
	/// inserted, keeping keys ordered. The key must not be present.
	fn leaf_insert_address(&self, key: &K) -> Address
	where
		K: Ord,
	{
		match self.btree.root_id() {
			Some(mut id) => loop {
				match self.btree.node(id) {
					Node::Internal(node) => {
						let branches = node.branches();
						id = match binary_search_governing(branches, key, false) {
							Some(i) => branches[i].child,
							None => node.first_child_id(),
						}
					}
					Node::Leaf(leaf) => {
						let offset = match binary_search_governing(leaf.items(), key, false) {
							Some(i) => i + 1,
							None => 0,
						};
						return Address::new(id, offset.into());
					}
				}
			},
			None => Address::nowhere(),
		}
	}

	/// A boundary inserted through a position hint must land right after the
	/// transitions kept below it; anything else means the hint was stale.
	fn hint_was_adjacent(&self, addr: Address) -> bool
	where
		K: Ord,
	{
		let key = self.btree.item(addr).unwrap().key();
		match self.btree.previous_item_address(addr) {
			Some(prev) => self.btree.item(prev).unwrap().key() < key,
			None => true,
		}
	}

	/// Iterate over the stored transitions, in key order.
	pub fn iter(&self) -> Iter<'_, K, V, C> {
		Iter::new(&self.btree)
	}
}

impl<'a, K, V, C: SimpleCollectionRef + Slab<Node<K, V>>> IntoIterator
	for &'a IntervalMap<K, V, C>
{
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V, C>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<K, V, C: SimpleCollectionRef + SimpleCollectionMut + SlabMut<Node<K, V>>>
	IntervalMap<K, V, C>
{
	/// Associate `value` to every key of the half-open range `[begin, end)`,
	/// leaving every other key unchanged.
	///
	/// A call with `!(begin < end)` is ignored and leaves the map untouched.
	///
	/// The transition table stays canonical: assigning a value already
	/// governing the keys right below `begin` extends that range instead of
	/// starting a new one, the value previously governing `end` resumes at
	/// `end` when it differs from `value`, and every transition the new
	/// range subsumes is removed. Runs in amortized O(log n) when assigned
	/// ranges stay small relative to the stored table.
	pub fn assign(&mut self, begin: K, end: K, value: V)
	where
		K: Ord,
		V: Clone + PartialEq,
	{
		if !(begin < end) {
			// empty or inverted range
			return;
		}

		// Values governing the two boundaries before any mutation. The begin
		// side looks strictly below `begin`, so that an existing transition
		// exactly at `begin` is overwritten rather than extended.
		let begin_redundant = match self.governing_address(&begin, true) {
			Some(addr) => *self.btree.item(addr).unwrap().value() == value,
			None => self.default == value,
		};

		let end_value = match self.governing_address(&end, false) {
			Some(addr) => self.btree.item(addr).unwrap().value().clone(),
			None => self.default.clone(),
		};

		// Remove every transition the assigned range subsumes, last to
		// first. Each removal yields the address of the item that followed
		// it, so after the final removal `hint` is the position right after
		// the removed span, where the new boundaries belong.
		let mut hint = None;
		let mut addr = self.governing_address(&end, false);
		while let Some(a) = addr {
			if *self.btree.item(a).unwrap().key() < begin {
				break;
			}
			let (_, next) = self.btree.remove_at(a).unwrap();
			addr = self.btree.previous_item_address(next);
			hint = Some(next);
		}

		let mut pos = match hint {
			Some(pos) => pos,
			None => self.leaf_insert_address(&end),
		};

		if end_value != value {
			// the value previously governing `end` resumes after the range
			pos = self.btree.insert_at(pos, Item::new(end, end_value));
			debug_assert!(self.hint_was_adjacent(pos));
		}

		if !begin_redundant {
			let addr = self.btree.insert_at(pos, Item::new(begin, value));
			debug_assert!(self.hint_was_adjacent(addr));
		}
	}

	/// Append a transition above every stored one, without restoring
	/// canonical form. The caller is responsible for keeping keys ordered
	/// and values non-redundant.
	pub(crate) fn push_transition(&mut self, key: K, value: V)
	where
		K: Ord,
	{
		let addr = self.leaf_insert_address(&key);
		self.btree.insert_at(addr, Item::new(key, value));
	}
}

/// Iterator over the transitions of an [`IntervalMap`], in key order.
pub struct Iter<'a, K, V, C> {
	btree: &'a BTreeMap<K, V, C>,
	/// Path from the root to the current position, as (node id, offset)
	/// pairs. Leaf offsets index items; internal offsets index branches.
	stack: Vec<(usize, usize)>,
}

impl<'a, K, V, C: SimpleCollectionRef + Slab<Node<K, V>>> Iter<'a, K, V, C> {
	fn new(btree: &'a BTreeMap<K, V, C>) -> Self {
		let mut iter = Iter {
			btree,
			stack: Vec::new(),
		};

		if let Some(id) = btree.root_id() {
			iter.descend(id)
		}

		iter
	}

	/// Push the path to the leftmost leaf of the subtree rooted at `id`.
	fn descend(&mut self, mut id: usize) {
		loop {
			self.stack.push((id, 0));
			match self.btree.node(id) {
				Node::Internal(node) => id = node.first_child_id(),
				Node::Leaf(_) => break,
			}
		}
	}
}

impl<'a, K, V, C: SimpleCollectionRef + Slab<Node<K, V>>> Iterator for Iter<'a, K, V, C> {
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		let btree = self.btree;
		while let Some((id, offset)) = self.stack.pop() {
			match btree.node(id) {
				Node::Internal(node) => {
					let branches = node.branches();
					if offset < branches.len() {
						self.stack.push((id, offset + 1));
						self.descend(branches[offset].child);
						let item = &branches[offset].item;
						return Some((item.key(), item.value()));
					}
				}
				Node::Leaf(leaf) => {
					let items = leaf.items();
					if offset < items.len() {
						self.stack.push((id, offset + 1));
						let item = &items[offset];
						return Some((item.key(), item.value()));
					}
				}
			}
		}

		None
	}
}

/// Search for the index of the item governing the given key: the greatest
/// item whose key is at or below `key`, or strictly below it if `strict` is
/// set.
pub fn binary_search_governing<K: Ord, V, I: AsRef<Item<K, V>>>(
	items: &[I],
	key: &K,
	strict: bool,
) -> Option<usize> {
	if items.is_empty() || !governs(items[0].as_ref().key(), key, strict) {
		None
	} else {
		let mut i = 0;
		let mut j = items.len() - 1;

		if governs(items[j].as_ref().key(), key, strict) {
			return Some(j);
		}

		// invariants:
		// items[i] governs key
		// items[j] does not
		// j > i

		while j - i > 1 {
			let k = (i + j) / 2;

			if governs(items[k].as_ref().key(), key, strict) {
				i = k;
			} else {
				j = k;
			}
		}

		Some(i)
	}
}

fn governs<K: Ord>(k: &K, key: &K, strict: bool) -> bool {
	if strict {
		k < key
	} else {
		!(key < k)
	}
}
