use crate::sdk::feature::PointFeature;
use std::collections::{BTreeMap, HashSet};

/// Group label for gardens without a local authority.
pub const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryGroup {
    pub key: String,
    pub members: Vec<PointFeature>,
}

impl DirectoryGroup {
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.title().unwrap_or_default())
    }
}

/// Groups features by local authority, keeping the first feature seen for each
/// title. Groups come out sorted by key and members sorted by title.
pub fn build_directory(features: &[PointFeature]) -> Vec<DirectoryGroup> {
    let mut grouped: BTreeMap<&str, (HashSet<&str>, Vec<&PointFeature>)> = BTreeMap::new();

    for feature in features {
        let key = feature.category().unwrap_or(FALLBACK_CATEGORY);
        let title = feature.title().unwrap_or_default();
        let (seen, members) = grouped.entry(key).or_default();
        if seen.insert(title) {
            members.push(feature);
        }
    }

    grouped
        .into_iter()
        .map(|(key, (_, mut members))| {
            // stable sort keeps first-seen order for identical titles
            members.sort_by(|a, b| a.title().unwrap_or_default().cmp(b.title().unwrap_or_default()));
            DirectoryGroup {
                key: key.to_string(),
                members: members.into_iter().cloned().collect(),
            }
        })
        .collect()
}
