//! Per-folder statistics.

use crate::global::GlobalGraph;
use std::collections::BTreeMap;
use vaultweave_core::{FolderIndex, FolderStats, Topic, TopicCount};

/// Aggregate one folder; orphan status is taken from `graph`.
pub fn folder_stats(index: &FolderIndex, graph: &GlobalGraph, top_n: usize) -> FolderStats {
    let orphans: Vec<String> = index
        .notes()
        .filter(|note| graph.is_orphan(note))
        .map(|note| note.name.clone())
        .collect();

    FolderStats {
        name: index.folder.clone(),
        note_count: index.len(),
        total_words: index.notes().map(|n| n.word_count).sum(),
        total_links: index.notes().map(|n| n.links.len()).sum(),
        orphaned_notes: orphans.len(),
        notes_with_code: index.notes().filter(|n| n.code_blocks).count(),
        top_topics: top_topics(index, top_n),
        notes: index.names().map(str::to_string).collect(),
        orphans,
    }
}

/// Most frequent topics, highest count first, ties by topic
pub fn top_topics(index: &FolderIndex, top_n: usize) -> Vec<TopicCount> {
    let mut counts: BTreeMap<&Topic, usize> = BTreeMap::new();
    for topic in index.notes().flat_map(|note| note.topics.iter()) {
        *counts.entry(topic).or_default() += 1;
    }

    let mut ranked: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, count)| TopicCount {
            topic: topic.clone(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    ranked.truncate(top_n);
    ranked
}
