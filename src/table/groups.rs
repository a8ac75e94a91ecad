use std::collections::HashMap;

use crate::model::BenefitRecord;

/// String-keyed map that iterates in first-insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedMap<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Value for `key`, inserted with `V::default()` at the end on first use.
    pub fn entry_or_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let existing = self.index.get(key).copied();
        let idx = match existing {
            Some(idx) => idx,
            None => {
                self.entries.push((key.to_string(), V::default()));
                let idx = self.entries.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Benefits of one `Popis`, keyed by the raw `Poistovna` value.
pub type InsurerBenefits = OrderedMap<Vec<String>>;

/// `Popis -> Poistovna -> [Benefit]`, duplicates and input order preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BenefitGroups {
    groups: OrderedMap<InsurerBenefits>,
}

impl BenefitGroups {
    pub fn build(records: &[BenefitRecord]) -> Self {
        let mut groups: OrderedMap<InsurerBenefits> = OrderedMap::new();
        for record in records {
            groups
                .entry_or_default(&record.popis)
                .entry_or_default(&record.poistovna)
                .push(record.benefit.clone());
        }
        Self { groups }
    }

    pub fn get(&self, popis: &str) -> Option<&InsurerBenefits> {
        self.groups.get(popis)
    }

    pub fn benefits(&self, popis: &str, poistovna: &str) -> &[String] {
        self.groups
            .get(popis)
            .and_then(|g| g.get(poistovna))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.keys()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
