/*
 * Batch Processor
 *
 * classify_all(records, fields, parent) → matrix of len(records) × len(fields)
 *
 * Parallel path: records are cut into `batch_size` chunks and mapped with
 * rayon (`par_chunks`), on the dedicated pool when one was built, else on
 * the global pool. Sequential path when `enable_rayon` is off or the
 * `parallel` feature is disabled. Both paths yield identical matrices.
 *
 * Requirements of a top-level record are resolved once per record, not
 * once per field.
 */

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use crate::config::parallel::ThreadPool;
use crate::config::ParallelConfig;
use crate::features::batch::domain::{ClassificationMatrix, SectionRecord};
use crate::features::classification::{FieldClassifier, ParentSection};
use crate::features::requirements::ResolvedRequirements;
use crate::shared::models::{as_record, record_id, CoreField, MetaState};

type Row = (String, Vec<MetaState>);

pub struct BatchProcessor<'a> {
    classifier: FieldClassifier<'a>,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: &'a ParallelConfig,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    pool: Option<&'a ThreadPool>,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(classifier: FieldClassifier<'a>, parallel: &'a ParallelConfig) -> Self {
        Self {
            classifier,
            parallel,
            pool: None,
        }
    }

    /// Run parallel batches on `pool` instead of the global rayon pool
    pub fn with_pool(mut self, pool: Option<&'a ThreadPool>) -> Self {
        self.pool = pool;
        self
    }

    pub fn classifier(&self) -> &FieldClassifier<'a> {
        &self.classifier
    }

    /// With a parent, every record is taken to be already projected to that
    /// section and shares the parent's requirement.
    pub fn classify_all(
        &self,
        records: &[Value],
        fields: &[&str],
        parent: Option<ParentSection>,
    ) -> ClassificationMatrix {
        let Some(parent) = parent else {
            return self.classify_top_level(records, fields);
        };

        let rows = self.map_rows(records, |index, record| {
            let states = fields
                .iter()
                .map(|field| self.classifier.classify(field, record, Some(parent)))
                .collect();
            (record_id(record, index), states)
        });
        ClassificationMatrix::from_rows(Some(parent.section), owned(fields), rows)
    }

    /// Classify top-level fields of full records
    pub fn classify_top_level(&self, records: &[Value], fields: &[&str]) -> ClassificationMatrix {
        let started = Instant::now();
        let rows = self.map_rows(records, |index, record| {
            let id = record_id(record, index);
            let resolved = match as_record(record) {
                Some(map) if !map.is_empty() => {
                    self.classifier.resolver().resolve_document(&id, record)
                }
                _ => ResolvedRequirements::all_required(),
            };
            let states = fields
                .iter()
                .map(|field| self.classifier.classify_resolved(field, record, &resolved).state)
                .collect();
            (id, states)
        });
        debug!(
            records = records.len(),
            fields = fields.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classified top-level batch"
        );
        ClassificationMatrix::from_rows(None, owned(fields), rows)
    }

    /// Classify second-level fields of records projected to `section`
    pub fn classify_sections(
        &self,
        records: &[SectionRecord],
        section: CoreField,
        fields: &[&str],
    ) -> ClassificationMatrix {
        let started = Instant::now();
        let rows = self.map_rows(records, |_, record| {
            let parent = ParentSection::new(section, record.requirement);
            let states = fields
                .iter()
                .map(|field| self.classifier.classify(field, &record.value, Some(parent)))
                .collect();
            (record.id.clone(), states)
        });
        debug!(
            section = section.as_str(),
            records = records.len(),
            fields = fields.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "classified section batch"
        );
        ClassificationMatrix::from_rows(Some(section), owned(fields), rows)
    }

    fn map_rows<T, F>(&self, items: &[T], row: F) -> Vec<Row>
    where
        T: Sync,
        F: Fn(usize, &T) -> Row + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            if self.parallel.enable_rayon && items.len() > 1 {
                let batch = self.parallel.batch_size.max(1);
                let row = &row;
                let run = move || {
                    items
                        .par_chunks(batch)
                        .enumerate()
                        .flat_map_iter(move |(chunk, slice)| {
                            slice
                                .iter()
                                .enumerate()
                                .map(move |(i, item)| row(chunk * batch + i, item))
                        })
                        .collect::<Vec<Row>>()
                };
                return match self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                };
            }
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| row(index, item))
            .collect()
    }
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}
