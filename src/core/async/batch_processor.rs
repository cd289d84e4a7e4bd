//! Batch processing with person-based partitioning for async record processing
//!
//! This module provides the `BatchProcessor` struct, which manages concurrent
//! batch processing with person-based partitioning to enable parallel
//! processing while maintaining per-person record ordering.
//!
//! # Design
//!
//! Every record names the person it concerns (amendments through their fine
//! id). A registration can pass between people within one batch: one owner
//! retires it and another registers it again, or a violation for one person
//! is rejected only because another still owns the vehicle. Records for
//! people who share a registration in the batch therefore depend on each
//! other's order.
//!
//! The `BatchProcessor` groups people connected through shared
//! registrations. Groups are applied concurrently; the records of one group
//! are applied sequentially, in input order.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AsyncFineEngine>  (shared record processor)
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use super::AsyncFineEngine;
use crate::types::{FineError, FineId, PersonId, ReportRecord};
use tracing::error;

/// Result of processing a single record
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The record that was processed
    pub record: ReportRecord,

    /// The result of processing (issued fine id, nothing, or error)
    pub result: Result<Option<FineId>, FineError>,
}

/// Batch processor with person-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe record processing engine
    engine: Arc<AsyncFineEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    pub fn new(engine: Arc<AsyncFineEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch into groups of people linked by registrations
    ///
    /// Two people land in the same group when any record of the batch links
    /// each of them to the same registration, directly or through other
    /// people.
    ///
    /// # Guarantees
    ///
    /// - Each record appears in exactly one group
    /// - All records of a person are in the same group
    /// - Records within a group keep their original order
    /// - Groups are ordered by the position of their first record
    pub fn partition_by_group(&self, batch: Vec<ReportRecord>) -> Vec<Vec<ReportRecord>> {
        let mut groups = PersonGroups::default();
        {
            let mut first_holder: HashMap<&str, PersonId> = HashMap::new();
            for record in &batch {
                let person = record.person();
                groups.insert(person);

                if let Some(registration) = record.registration() {
                    match first_holder.entry(registration) {
                        Entry::Occupied(entry) => groups.union(*entry.get(), person),
                        Entry::Vacant(entry) => {
                            entry.insert(person);
                        }
                    }
                }
            }
        }

        let mut partitions: Vec<Vec<ReportRecord>> = Vec::new();
        let mut index_of: HashMap<PersonId, usize> = HashMap::new();
        for record in batch {
            let root = groups.find(record.person());
            let index = *index_of.entry(root).or_insert_with(|| {
                partitions.push(Vec::new());
                partitions.len() - 1
            });
            partitions[index].push(record);
        }

        partitions
    }

    /// Process all records of one group sequentially
    ///
    /// All records are processed even if some fail; results keep the input
    /// order.
    pub async fn process_person_records(
        &self,
        records: Vec<ReportRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let result = self.engine.process_record(record.clone());
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch of records with person-based partitioning
    ///
    /// This method processes a batch of records by:
    /// 1. Partitioning the batch into groups of linked people
    /// 2. Spawning tokio tasks to process each group's records concurrently
    /// 3. Waiting for all tasks to complete
    /// 4. Collecting and returning all results
    ///
    /// Results of different groups may be interleaved in any order.
    pub async fn process_batch(&self, batch: Vec<ReportRecord>) -> Vec<ProcessingResult> {
        let groups = self.partition_by_group(batch);

        let mut tasks = Vec::with_capacity(groups.len());
        for records in groups {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_person_records(records).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(group_results) => results.extend(group_results),
                Err(e) => error!("record task panicked: {}", e),
            }
        }

        results
    }
}

/// Disjoint sets of person IDs
#[derive(Debug, Default)]
struct PersonGroups {
    parent: HashMap<PersonId, PersonId>,
}

impl PersonGroups {
    fn insert(&mut self, person: PersonId) {
        self.parent.entry(person).or_insert(person);
    }

    fn find(&mut self, person: PersonId) -> PersonId {
        let mut current = person;
        while let Some(&parent) = self.parent.get(&current) {
            if parent == current {
                break;
            }
            // path halving
            let grandparent = self.parent.get(&parent).copied().unwrap_or(parent);
            self.parent.insert(current, grandparent);
            current = grandparent;
        }
        current
    }

    fn union(&mut self, a: PersonId, b: PersonId) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            self.parent.insert(root_b, root_a);
        }
    }
}
