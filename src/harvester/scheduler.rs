//! Fixed-window concurrency scheduler
//!
//! Work items are split into consecutive chunks of at most `width` items.
//! Every item in a chunk runs concurrently on the tokio runtime, and the next
//! chunk starts only after the whole chunk has finished. Results land in
//! slots indexed by input position, so output order is input order no matter
//! which task completes first.

use crate::HarvestError;
use std::future::Future;
use tokio::task::JoinSet;

/// Scheduler running work in fixed-size concurrent windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScheduler {
    width: usize,
}

impl WindowScheduler {
    /// Creates a scheduler; a width of 0 is treated as 1
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of chunks needed for `items` work items
    pub fn chunk_count(&self, items: usize) -> usize {
        items.div_ceil(self.width)
    }

    /// Runs infallible tasks, returning results in input order
    pub async fn run<T, R, F, Fut>(&self, items: Vec<T>, mut task: F) -> crate::Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        self.try_run(items, move |item| {
            let fut = task(item);
            async move { Ok::<R, HarvestError>(fut.await) }
        })
        .await
    }

    /// Runs fallible tasks, returning results in input order
    ///
    /// If any task in a chunk fails, the rest of that chunk still runs to
    /// completion, no later chunk is started, and the error of the earliest
    /// failing item (by input position) is returned.
    pub async fn try_run<T, R, E, F, Fut>(&self, items: Vec<T>, task: F) -> crate::Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        HarvestError: From<E>,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
    {
        self.try_run_with(items, task, |_, _| Ok(())).await
    }

    /// Like [`try_run`](Self::try_run), calling `on_chunk(index, len)` before
    /// each chunk starts
    ///
    /// An error from `on_chunk` stops the run before that chunk is spawned.
    pub async fn try_run_with<T, R, E, F, Fut, C>(
        &self,
        items: Vec<T>,
        mut task: F,
        mut on_chunk: C,
    ) -> crate::Result<Vec<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        HarvestError: From<E>,
        F: FnMut(T) -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        C: FnMut(usize, usize) -> crate::Result<()>,
    {
        let total = items.len();
        let mut slots: Vec<Option<R>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        let mut pending = items.into_iter().enumerate().peekable();
        let mut chunk_index = 0;

        while pending.peek().is_some() {
            let chunk: Vec<(usize, T)> = pending.by_ref().take(self.width).collect();
            on_chunk(chunk_index, chunk.len())?;
            tracing::trace!("Starting chunk {} with {} items", chunk_index, chunk.len());

            let mut set = JoinSet::new();
            for (index, item) in chunk {
                let fut = task(item);
                set.spawn(async move { (index, fut.await) });
            }

            let mut first_error: Option<(usize, E)> = None;
            while let Some(joined) = set.join_next().await {
                let (index, result) = joined?;
                match result {
                    Ok(value) => slots[index] = Some(value),
                    Err(error) => {
                        if first_error.as_ref().map_or(true, |(i, _)| index < *i) {
                            first_error = Some((index, error));
                        }
                    }
                }
            }

            if let Some((index, error)) = first_error {
                tracing::debug!(
                    "Chunk {} failed at item {}; not starting further chunks",
                    chunk_index,
                    index
                );
                return Err(error.into());
            }

            chunk_index += 1;
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
