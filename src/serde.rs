use std::marker::PhantomData;

use btree_slab::generic::Node;
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use serde::{
	de::Error,
	ser::{SerializeSeq, SerializeTuple},
	Deserialize, Serialize,
};

use crate::generic;

/// An interval map serializes as a 2-tuple of its default value and its
/// transition sequence, in key order.
impl<K: Serialize, V: Serialize, C: SimpleCollectionRef + Slab<Node<K, V>>> Serialize
	for generic::IntervalMap<K, V, C>
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut t = serializer.serialize_tuple(2)?;
		t.serialize_element(self.default_value())?;
		t.serialize_element(&Transitions(self))?;
		t.end()
	}
}

struct Transitions<'a, K, V, C>(&'a generic::IntervalMap<K, V, C>);

impl<'a, K: Serialize, V: Serialize, C: SimpleCollectionRef + Slab<Node<K, V>>> Serialize
	for Transitions<'a, K, V, C>
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.transition_count()))?;

		for transition in self.0 {
			seq.serialize_element(&transition)?;
		}

		seq.end()
	}
}

impl<
		'de,
		K: Ord + Deserialize<'de>,
		V: PartialEq + Deserialize<'de>,
		C: Default + SimpleCollectionRef + SimpleCollectionMut + SlabMut<Node<K, V>>,
	> Deserialize<'de> for generic::IntervalMap<K, V, C>
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct Visitor<K, V, C>(PhantomData<(K, V, C)>);

		impl<
				'de,
				K: Ord + Deserialize<'de>,
				V: PartialEq + Deserialize<'de>,
				C: Default + SimpleCollectionRef + SimpleCollectionMut + SlabMut<Node<K, V>>,
			> serde::de::Visitor<'de> for Visitor<K, V, C>
		{
			type Value = generic::IntervalMap<K, V, C>;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "an interval map")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>,
			{
				let default: V = seq
					.next_element()?
					.ok_or_else(|| A::Error::custom("missing default value"))?;
				let transitions: Vec<(K, V)> = seq
					.next_element()?
					.ok_or_else(|| A::Error::custom("missing transitions"))?;

				// Only canonical tables are accepted; anything else would
				// silently break the map's invariants.
				if let Some(first) = transitions.first() {
					if first.1 == default {
						return Err(A::Error::custom("leading transition carries the default value"));
					}
				}
				for pair in transitions.windows(2) {
					if !(pair[0].0 < pair[1].0) {
						return Err(A::Error::custom("unordered transitions"));
					}
					if pair[0].1 == pair[1].1 {
						return Err(A::Error::custom("redundant adjacent transitions"));
					}
				}

				let mut result = generic::IntervalMap::new(default);

				for (key, value) in transitions {
					result.push_transition(key, value);
				}

				Ok(result)
			}
		}

		deserializer.deserialize_tuple(2, Visitor(PhantomData))
	}
}
