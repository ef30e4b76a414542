// Transforms — input-side and label-side sample rewrites

use std::collections::HashMap;

use crate::dataset::Sample;

/// A transform applied to the input component of a sample.
///
/// Implementations must leave `label` untouched; label remapping goes through
/// [`LabelTransform`] so the two sides compose independently.
pub trait Transform: Send + Sync {
    /// Apply the transform to a sample, returning the modified sample.
    fn apply(&self, sample: Sample) -> Sample;
}

/// A transform remapping a class label.
pub trait LabelTransform: Send + Sync {
    /// Map a label to its replacement.
    fn apply(&self, label: i64) -> i64;
}

impl<F> Transform for F
where
    F: Fn(Sample) -> Sample + Send + Sync,
{
    fn apply(&self, sample: Sample) -> Sample {
        self(sample)
    }
}

impl<F> LabelTransform for F
where
    F: Fn(i64) -> i64 + Send + Sync,
{
    fn apply(&self, label: i64) -> i64 {
        self(label)
    }
}

// Label transforms

/// Remap labels through an explicit old → new table.
///
/// Labels absent from the table pass through unchanged. The typical use is
/// compacting a filtered label range, e.g. `[(1, 0), (2, 1)]` after keeping
/// only classes 1 and 2.
#[derive(Debug, Clone)]
pub struct RemapLabels {
    table: HashMap<i64, i64>,
}

impl RemapLabels {
    pub fn new(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }
}

impl LabelTransform for RemapLabels {
    fn apply(&self, label: i64) -> i64 {
        self.table.get(&label).copied().unwrap_or(label)
    }
}

/// Shift every label by a constant offset.
///
/// Handy for stacking per-task label ranges onto a shared output head.
#[derive(Debug, Clone)]
pub struct OffsetLabel {
    pub offset: i64,
}

impl OffsetLabel {
    pub fn new(offset: i64) -> Self {
        Self { offset }
    }
}

impl LabelTransform for OffsetLabel {
    fn apply(&self, label: i64) -> i64 {
        label + self.offset
    }
}

// Channelwise value transforms

/// Number of channels for a `[C,H,W]` or `[N,C,H,W]` shape.
///
/// # Panics
/// Panics on any other rank.
fn channel_count(shape: &[usize]) -> usize {
    match shape.len() {
        3 => shape[0],
        4 => shape[1],
        rank => panic!(
            "expected [C,H,W] or [N,C,H,W] values, got rank-{} shape {:?}",
            rank, shape
        ),
    }
}

/// Normalize values per channel: `x' = (x - mean[c]) / std[c]`.
#[derive(Debug, Clone)]
pub struct Normalize {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl Normalize {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Self {
        Self { mean, std }
    }

    /// Normalize a raw value buffer in place.
    ///
    /// # Panics
    /// Panics if `shape` is not `[C,H,W]` or `[N,C,H,W]`, or if `mean`/`std`
    /// length differs from the channel count.
    pub fn apply_to(&self, values: &mut [f64], shape: &[usize]) {
        let channels = channel_count(shape);
        assert_eq!(
            self.mean.len(),
            channels,
            "Normalize: {} mean values for {} channels",
            self.mean.len(),
            channels
        );
        assert_eq!(
            self.std.len(),
            channels,
            "Normalize: {} std values for {} channels",
            self.std.len(),
            channels
        );
        let plane: usize = shape[shape.len() - 2..].iter().product();
        for (i, v) in values.iter_mut().enumerate() {
            let c = (i / plane) % channels;
            *v = (*v - self.mean[c]) / self.std[c];
        }
    }
}

impl Transform for Normalize {
    fn apply(&self, mut sample: Sample) -> Sample {
        self.apply_to(&mut sample.input, &sample.input_shape);
        sample
    }
}

/// Undo [`Normalize`] per channel: `x' = x * std[c] + mean[c]`.
///
/// Operates in place on `[C,H,W]` images or `[N,C,H,W]` batches; the usual
/// consumer is visualization code recovering pixel values from normalized
/// model inputs.
#[derive(Debug, Clone)]
pub struct UnNormalize {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl UnNormalize {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Self {
        Self { mean, std }
    }

    /// Denormalize a raw value buffer in place.
    ///
    /// # Panics
    /// Panics if `shape` is not `[C,H,W]` or `[N,C,H,W]`, or if `mean`/`std`
    /// length differs from the channel count.
    pub fn apply_to(&self, values: &mut [f64], shape: &[usize]) {
        let channels = channel_count(shape);
        assert_eq!(
            self.mean.len(),
            channels,
            "UnNormalize: {} mean values for {} channels",
            self.mean.len(),
            channels
        );
        assert_eq!(
            self.std.len(),
            channels,
            "UnNormalize: {} std values for {} channels",
            self.std.len(),
            channels
        );
        let plane: usize = shape[shape.len() - 2..].iter().product();
        for (i, v) in values.iter_mut().enumerate() {
            let c = (i / plane) % channels;
            *v = *v * self.std[c] + self.mean[c];
        }
    }
}

impl Transform for UnNormalize {
    fn apply(&self, mut sample: Sample) -> Sample {
        self.apply_to(&mut sample.input, &sample.input_shape);
        sample
    }
}

/// Chain multiple input transforms.
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }
}

impl Transform for Compose {
    fn apply(&self, mut sample: Sample) -> Sample {
        for t in &self.transforms {
            sample = t.apply(sample);
        }
        sample
    }
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn image_sample(c: usize, h: usize, w: usize, fill: f64) -> Sample {
        Sample {
            input: vec![fill; c * h * w],
            input_shape: vec![c, h, w],
            label: 0,
        }
    }

    #[test]
    fn remap_labels_table_and_passthrough() {
        let remap = RemapLabels::new([(1, 0), (2, 1)]);
        assert_eq!(remap.apply(1), 0);
        assert_eq!(remap.apply(2), 1);
        assert_eq!(remap.apply(5), 5);
    }

    #[test]
    fn offset_label() {
        let t = OffsetLabel::new(10);
        assert_eq!(t.apply(3), 13);
    }

    #[test]
    fn closure_as_label_transform() {
        let t: Box<dyn LabelTransform> = Box::new(|l: i64| l * 2);
        assert_eq!(t.apply(4), 8);
    }

    #[test]
    fn unnormalize_zero_batch_recovers_mean() {
        // Normalized zeros map back to the per-channel mean.
        let un = UnNormalize::new(vec![0.5, 0.5, 0.5], vec![0.5, 0.5, 0.5]);
        let mut values = vec![0.0; 2 * 3 * 2 * 2];
        un.apply_to(&mut values, &[2, 3, 2, 2]);
        assert!(values.iter().all(|&v| (v - 0.5).abs() < 1e-12));
    }

    #[test]
    fn unnormalize_per_channel_single_image() {
        let un = UnNormalize::new(vec![1.0, 2.0], vec![10.0, 100.0]);
        let mut values = vec![1.0; 2 * 2 * 2];
        un.apply_to(&mut values, &[2, 2, 2]);
        assert_eq!(&values[..4], &[11.0, 11.0, 11.0, 11.0]);
        assert_eq!(&values[4..], &[102.0, 102.0, 102.0, 102.0]);
    }

    #[test]
    fn normalize_then_unnormalize_roundtrip() {
        let mean = vec![0.3, 0.6];
        let std = vec![0.2, 0.4];
        let norm = Normalize::new(mean.clone(), std.clone());
        let un = UnNormalize::new(mean, std);

        let original: Vec<f64> = (0..2 * 2 * 3).map(|i| i as f64 / 10.0).collect();
        let mut values = original.clone();
        norm.apply_to(&mut values, &[2, 2, 3]);
        un.apply_to(&mut values, &[2, 2, 3]);
        for (a, b) in values.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "mean values for")]
    fn unnormalize_channel_mismatch() {
        let un = UnNormalize::new(vec![0.5], vec![0.5]);
        let mut sample = image_sample(3, 2, 2, 0.0);
        un.apply_to(&mut sample.input, &sample.input_shape);
    }

    #[test]
    fn compose_applies_in_order() {
        let compose = Compose::new(vec![
            Box::new(Normalize::new(vec![1.0], vec![2.0])),
            Box::new(UnNormalize::new(vec![0.0], vec![4.0])),
        ]);
        let sample = image_sample(1, 1, 1, 5.0);
        let out = compose.apply(sample);
        // (5 - 1) / 2 = 2, then 2 * 4 + 0 = 8
        assert_eq!(out.input, vec![8.0]);
        assert_eq!(out.label, 0);
    }
}
