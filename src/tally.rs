use crate::error::ApportionError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;

/// Party name to vote count, kept in insertion order.
///
/// The order matters: parties with equal votes or equal residuals are
/// ranked in the order they were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    entries: Vec<(String, u64)>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets the votes for `party`. An existing party keeps its position and
    /// the previous count is returned.
    pub fn insert(&mut self, party: &str, votes: i64) -> Result<Option<u64>, ApportionError> {
        if votes < 0 {
            return Err(ApportionError::NegativeVotes {
                party: party.to_string(),
                votes,
            });
        }
        Ok(self.set(party.to_string(), votes as u64))
    }

    fn set(&mut self, party: String, votes: u64) -> Option<u64> {
        match self.entries.iter_mut().find(|(p, _)| p == &party) {
            Some((_, v)) => Some(std::mem::replace(v, votes)),
            None => {
                self.entries.push((party, votes));
                None
            }
        }
    }

    pub fn get(&self, party: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(p, _)| p == party)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), *v))
    }

    /// Sum of all party votes, saturating.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, v)| acc.saturating_add(*v))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for VoteTally {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut tally = VoteTally::new();
        for (party, votes) in iter {
            tally.set(party.into(), votes);
        }
        tally
    }
}

impl Serialize for VoteTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (party, votes) in self.entries.iter() {
            map.serialize_entry(party, votes)?;
        }
        map.end()
    }
}

struct TallyVisitor;

impl<'de> Visitor<'de> for TallyVisitor {
    type Value = VoteTally;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of party name to integer vote count")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut tally = VoteTally::new();
        while let Some((party, votes)) = access.next_entry::<String, i64>()? {
            tally
                .insert(&party, votes)
                .map_err(<M::Error as de::Error>::custom)?;
        }
        Ok(tally)
    }
}

impl<'de> Deserialize<'de> for VoteTally {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TallyVisitor)
    }
}
