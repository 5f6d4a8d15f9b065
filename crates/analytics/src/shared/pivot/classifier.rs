use contracts::domain::a001_sale_record::Record;
use contracts::shared::pivot::GroupField;
use std::collections::HashMap;

/// Records partitioned by a key, in first-seen key order.
#[derive(Debug, Clone, Default)]
pub struct Groups<'a> {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    members: Vec<Vec<&'a Record>>,
}

impl<'a> Groups<'a> {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[&'a Record]> {
        self.index.get(key).map(|&i| self.members[i].as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Groups in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Record])> {
        self.keys
            .iter()
            .zip(self.members.iter())
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn push(&mut self, key: String, record: &'a Record) {
        match self.index.get(&key) {
            Some(&i) => self.members[i].push(record),
            None => {
                self.index.insert(key.clone(), self.keys.len());
                self.keys.push(key);
                self.members.push(vec![record]);
            }
        }
    }
}

/// Partition records by `key_fn`. A missing or blank key goes to `fallback`.
pub fn group_by<'a, I, F>(records: I, key_fn: F, fallback: &str) -> Groups<'a>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&'a Record) -> Option<&'a str>,
{
    let mut groups = Groups::default();
    for record in records {
        let key = key_fn(record)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(fallback);
        groups.push(key.to_string(), record);
    }
    groups
}

/// Partition records by one of the standard fields
pub fn group_by_field<'a, I>(records: I, field: GroupField) -> Groups<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    group_by(records, |r| field_value(r, field), field.fallback_label())
}

/// Raw value of a grouping field, before the fallback is applied
pub fn field_value(record: &Record, field: GroupField) -> Option<&str> {
    match field {
        GroupField::Category => record.cleaned_category.as_deref(),
        GroupField::Product => record.cleaned_product.as_deref(),
        GroupField::Location => record.location.as_deref(),
        GroupField::SoldBy => record.sold_by.as_deref(),
        GroupField::PaymentMethod => record.payment_method.as_deref(),
    }
}
