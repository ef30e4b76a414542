// Dataset combinators — reduce, filter, transform, concatenate

use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::{Dataset, Sample};
use crate::transform::{LabelTransform, Transform};

// ReducedDataset — view of an explicit index list

/// A dataset exposing only the samples at the given indices, in the given
/// order.
///
/// This is the building block for train/validation splitting: several views
/// can share one source through the `Arc` without copying any data. Indices
/// are trusted at construction; an out-of-range entry surfaces as the inner
/// dataset's panic on first access.
pub struct ReducedDataset<D: Dataset> {
    inner: Arc<D>,
    indices: Vec<usize>,
}

impl<D: Dataset> ReducedDataset<D> {
    /// Create a view of `inner` containing the samples at `indices`.
    pub fn new(inner: impl Into<Arc<D>>, indices: Vec<usize>) -> Self {
        Self {
            inner: inner.into(),
            indices,
        }
    }

    /// The index list backing this view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl<D: Dataset> Dataset for ReducedDataset<D> {
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Sample {
        self.inner.get(self.indices[index])
    }

    fn labels(&self) -> Option<Vec<i64>> {
        let labels = self.inner.labels()?;
        Some(self.indices.iter().map(|&i| labels[i]).collect())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// SubDataset — label-filtered view with optional relabeling

/// A dataset retaining only the samples whose label is in an accepted set.
///
/// The wrapped source is scanned once at construction, through its bulk
/// [`Dataset::labels`] capability when available and sample by sample
/// otherwise; the qualifying indices are kept in source order. `len` is
/// O(1) afterwards.
///
/// An optional [`LabelTransform`] remaps the label of every returned sample,
/// which is how a filtered class range gets compacted (e.g. keep `{1, 2}`,
/// then remap `1 → 0, 2 → 1`). The transform never touches the input.
///
/// An accepted set matching no sample yields an empty dataset; that is the
/// caller's concern, not an error.
pub struct SubDataset<D: Dataset> {
    inner: D,
    retained: Vec<usize>,
    label_transform: Option<Box<dyn LabelTransform>>,
}

impl<D: Dataset> SubDataset<D> {
    /// Filter `inner` down to the samples whose label is in `accepted`.
    pub fn new(inner: D, accepted: &[i64]) -> Self {
        let retained = Self::scan(&inner, accepted);
        Self {
            inner,
            retained,
            label_transform: None,
        }
    }

    /// Like [`SubDataset::new`], additionally remapping every returned label.
    pub fn with_label_transform(
        inner: D,
        accepted: &[i64],
        label_transform: Box<dyn LabelTransform>,
    ) -> Self {
        let retained = Self::scan(&inner, accepted);
        Self {
            inner,
            retained,
            label_transform: Some(label_transform),
        }
    }

    fn scan(inner: &D, accepted: &[i64]) -> Vec<usize> {
        let accept: HashSet<i64> = accepted.iter().copied().collect();
        match inner.labels() {
            Some(labels) => labels
                .iter()
                .enumerate()
                .filter(|(_, label)| accept.contains(label))
                .map(|(i, _)| i)
                .collect(),
            None => (0..inner.len())
                .filter(|&i| accept.contains(&inner.get(i).label))
                .collect(),
        }
    }

    /// The retained source indices, in source order.
    pub fn retained_indices(&self) -> &[usize] {
        &self.retained
    }
}

impl<D: Dataset> Dataset for SubDataset<D> {
    fn len(&self) -> usize {
        self.retained.len()
    }

    fn get(&self, index: usize) -> Sample {
        let mut sample = self.inner.get(self.retained[index]);
        if let Some(t) = &self.label_transform {
            sample.label = t.apply(sample.label);
        }
        sample
    }

    fn labels(&self) -> Option<Vec<i64>> {
        let labels = self.inner.labels()?;
        Some(
            self.retained
                .iter()
                .map(|&i| match &self.label_transform {
                    Some(t) => t.apply(labels[i]),
                    None => labels[i],
                })
                .collect(),
        )
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// TransformedDataset — lazy per-access transform view

/// A dataset applying an input [`Transform`] and/or a [`LabelTransform`] to
/// every sample as it is read.
///
/// Transforms run on each access with no caching, so a stochastic transform
/// (random crop, noise) is re-drawn on every read. The two sides apply
/// independently: the input transform never sees the label side and the
/// label transform is a pure `i64 → i64` map.
pub struct TransformedDataset<D: Dataset> {
    inner: D,
    transform: Option<Box<dyn Transform>>,
    label_transform: Option<Box<dyn LabelTransform>>,
}

impl<D: Dataset> TransformedDataset<D> {
    /// Wrap `inner` with no transforms; add them with the `with_` builders.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            transform: None,
            label_transform: None,
        }
    }

    /// Set the input transform.
    pub fn with_transform(mut self, t: Box<dyn Transform>) -> Self {
        self.transform = Some(t);
        self
    }

    /// Set the label transform.
    pub fn with_label_transform(mut self, t: Box<dyn LabelTransform>) -> Self {
        self.label_transform = Some(t);
        self
    }
}

impl<D: Dataset> Dataset for TransformedDataset<D> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Sample {
        let mut sample = self.inner.get(index);
        if let Some(t) = &self.transform {
            sample = t.apply(sample);
        }
        if let Some(t) = &self.label_transform {
            sample.label = t.apply(sample.label);
        }
        sample
    }

    fn labels(&self) -> Option<Vec<i64>> {
        let labels = self.inner.labels()?;
        match &self.label_transform {
            Some(t) => Some(labels.into_iter().map(|l| t.apply(l)).collect()),
            None => Some(labels),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ConcatDataset — concatenate datasets end-to-end

/// Concatenate two or more datasets end-to-end.
pub struct ConcatDataset {
    parts: Vec<Box<dyn Dataset>>,
    cumulative: Vec<usize>,
}

impl ConcatDataset {
    pub fn new(parts: Vec<Box<dyn Dataset>>) -> Self {
        let mut cumulative = Vec::with_capacity(parts.len());
        let mut total = 0;
        for part in &parts {
            total += part.len();
            cumulative.push(total);
        }
        Self { parts, cumulative }
    }

    /// Locate which part and local index a global index maps to.
    fn locate(&self, index: usize) -> (usize, usize) {
        let part = self.cumulative.partition_point(|&c| c <= index);
        if part == self.parts.len() {
            panic!(
                "ConcatDataset: index {} out of range (total {})",
                index,
                self.cumulative.last().copied().unwrap_or(0)
            );
        }
        let offset = if part == 0 {
            0
        } else {
            self.cumulative[part - 1]
        };
        (part, index - offset)
    }
}

impl Dataset for ConcatDataset {
    fn len(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    fn get(&self, index: usize) -> Sample {
        let (part, local) = self.locate(index);
        self.parts[part].get(local)
    }

    fn labels(&self) -> Option<Vec<i64>> {
        let mut all = Vec::with_capacity(self.len());
        for part in &self.parts {
            all.extend(part.labels()?);
        }
        Some(all)
    }

    fn name(&self) -> &str {
        "concat"
    }
}

// Train / validation / test split

/// Split a dataset into 2 or 3 [`ReducedDataset`] views over a shared source.
///
/// Indices are shuffled with a seeded RNG so the same seed reproduces the
/// same split; the remainder after rounding goes to the last split.
///
/// # Panics
/// Panics unless `ratios` has 2 or 3 elements summing to 1.0.
pub fn split_by_ratio<D: Dataset>(
    dataset: D,
    ratios: &[f64],
    seed: u64,
) -> Vec<ReducedDataset<D>> {
    assert!(
        ratios.len() >= 2 && ratios.len() <= 3,
        "split_by_ratio: ratios must have 2 or 3 elements"
    );
    let sum: f64 = ratios.iter().sum();
    assert!(
        (sum - 1.0).abs() < 1e-6,
        "split_by_ratio: ratios must sum to 1.0, got {}",
        sum
    );

    let n = dataset.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let dataset = Arc::new(dataset);
    let mut splits = Vec::with_capacity(ratios.len());
    let mut offset = 0;
    for (i, &ratio) in ratios.iter().enumerate() {
        let count = if i == ratios.len() - 1 {
            n - offset
        } else {
            (n as f64 * ratio).round() as usize
        };
        let end = (offset + count).min(n);
        splits.push(ReducedDataset::new(
            dataset.clone(),
            indices[offset..end].to_vec(),
        ));
        offset = end;
    }

    splits
}

// Tests
