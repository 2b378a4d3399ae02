use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use bureau_core::document::{BatchOutcome, ExtractionError, ExtractionRecord, ExtractionRequest};
use bureau_core::error::Result;
use bureau_core::inference::InferenceClient;
use bureau_core::instruction::build_instruction;
use bureau_core::progress::{BatchObserver, Progress};
use bureau_core::vocabulary::Vocabulary;

use crate::parser::parse_response;

/// Runs one instruction over a batch of documents, isolating failures per document.
///
/// With the default concurrency of 1 documents are sent strictly in input order with a
/// single request in flight. Higher limits fan out over a bounded pool; results are
/// merged back by input index either way.
pub struct BatchExtractor {
    client: Arc<dyn InferenceClient>,
    vocabulary: Vocabulary,
    concurrency: usize,
}

impl BatchExtractor {
    pub fn new(client: Arc<dyn InferenceClient>, vocabulary: Vocabulary) -> Self {
        Self {
            client,
            vocabulary,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(
        &self,
        requests: Vec<ExtractionRequest>,
        observer: &dyn BatchObserver,
    ) -> BatchOutcome {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let total = requests.len();
        let instruction = build_instruction(&self.vocabulary);

        tracing::info!(
            %run_id,
            total,
            concurrency = self.concurrency,
            model = %self.client.model(),
            "Starting batch extraction"
        );

        let results = if self.concurrency == 1 || total <= 1 {
            self.run_sequential(&instruction, requests, observer).await
        } else {
            self.run_concurrent(instruction, requests, observer).await
        };

        let mut records = Vec::with_capacity(total);
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            tracing::info!(%run_id, count = records.len(), "Batch extraction completed successfully");
        } else {
            tracing::warn!(
                %run_id,
                succeeded = records.len(),
                failed = errors.len(),
                "Batch extraction completed with failures"
            );
        }

        BatchOutcome {
            run_id,
            started_at,
            finished_at: Utc::now(),
            total,
            records,
            errors,
        }
    }

    async fn run_sequential(
        &self,
        instruction: &str,
        requests: Vec<ExtractionRequest>,
        observer: &dyn BatchObserver,
    ) -> Vec<std::result::Result<ExtractionRecord, ExtractionError>> {
        let total = requests.len();
        let mut results = Vec::with_capacity(total);

        for (i, request) in requests.iter().enumerate() {
            let result = extract_one(self.client.as_ref(), &self.vocabulary, instruction, request)
                .await
                .map_err(|e| ExtractionError::new(request.file_name(), e.to_string()));

            if let Err(error) = &result {
                observer.on_error(error);
            }
            observer.on_progress(Progress {
                completed: i + 1,
                total,
            });
            results.push(result);
        }

        results
    }

    async fn run_concurrent(
        &self,
        instruction: String,
        requests: Vec<ExtractionRequest>,
        observer: &dyn BatchObserver,
    ) -> Vec<std::result::Result<ExtractionRecord, ExtractionError>> {
        let total = requests.len();
        let instruction: Arc<str> = Arc::from(instruction);
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let file_names: Vec<String> = requests.iter().map(|r| r.file_name().to_string()).collect();

        let mut join_set = JoinSet::new();
        for (i, request) in requests.into_iter().enumerate() {
            let client = self.client.clone();
            let vocabulary = self.vocabulary.clone();
            let instruction = instruction.clone();
            let semaphore = semaphore.clone();

            join_set.spawn(async move {
                // The semaphore is never closed, so acquire only fails if that changes.
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (i, Err(ExtractionError::new(request.file_name(), e.to_string())))
                    }
                };
                let result = extract_one(client.as_ref(), &vocabulary, &instruction, &request)
                    .await
                    .map_err(|e| ExtractionError::new(request.file_name(), e.to_string()));
                (i, result)
            });
        }

        let mut slots: Vec<Option<std::result::Result<ExtractionRecord, ExtractionError>>> =
            (0..total).map(|_| None).collect();
        let mut completed = 0;

        while let Some(join_result) = join_set.join_next().await {
            completed += 1;
            match join_result {
                Ok((i, result)) => {
                    if let Err(error) = &result {
                        observer.on_error(error);
                    }
                    observer.on_progress(Progress { completed, total });
                    slots[i] = Some(result);
                }
                Err(join_err) => {
                    tracing::error!(error = %join_err, "Extraction task panicked");
                    observer.on_progress(Progress { completed, total });
                }
            }
        }

        // Slots left empty belong to tasks that panicked before reporting their index.
        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.unwrap_or_else(|| {
                    let error = ExtractionError::new(
                        file_names[i].clone(),
                        "extraction task terminated unexpectedly",
                    );
                    observer.on_error(&error);
                    Err(error)
                })
            })
            .collect()
    }
}

/// One document: infer, parse, stamp the file name. Any failure stays inside this item.
pub async fn extract_one(
    client: &dyn InferenceClient,
    vocabulary: &Vocabulary,
    instruction: &str,
    request: &ExtractionRequest,
) -> Result<ExtractionRecord> {
    tracing::info!(file_name = %request.file_name(), "Extracting document");

    let raw = client
        .infer(instruction, request.document_bytes(), request.mime_type())
        .await?;
    let fields = parse_response(&raw)?;
    let record = ExtractionRecord::from_fields(fields, request);

    if !record.bureau.is_empty() && !vocabulary.contains_bureau(&record.bureau) {
        tracing::warn!(
            file_name = %record.file_name,
            bureau = %record.bureau,
            "Extracted bureau is not in the vocabulary"
        );
    }
    if !record.category.is_empty() && !vocabulary.contains_category(&record.category) {
        tracing::warn!(
            file_name = %record.file_name,
            category = %record.category,
            "Extracted category is not in the vocabulary"
        );
    }

    Ok(record)
}
