//! # vole-data
//!
//! Dataset views, label filtering, and sample transforms for the Vole
//! training loop.
//!
//! This crate provides:
//! - [`Dataset`] trait — unified interface for any sample source, with an
//!   optional bulk-label capability for cheap label scans
//! - Dataset combinators — [`ReducedDataset`], [`SubDataset`],
//!   [`TransformedDataset`], [`ConcatDataset`], [`split_by_ratio`]
//! - Leaf sources built from raw arrays — [`FeatureDataset`], [`CustomDataset`]
//! - Input and label transforms — [`Normalize`], [`UnNormalize`],
//!   [`RemapLabels`], [`Compose`], and friends
//! - Stochastic augmentation — [`RandomHorizontalFlip`], [`RandomNoise`]
//!
//! Combinators are plain wrappers: each one holds its source (owned or
//! shared), translates indices or rewrites samples at access time, and never
//! copies or mutates the underlying data. Chains of wrappers nest to any
//! depth and every `get` re-dispatches down the chain to the leaf.

pub mod augment;
pub mod combinators;
pub mod dataset;
pub mod sources;
pub mod transform;

pub use augment::{RandomHorizontalFlip, RandomNoise};
pub use combinators::{
    split_by_ratio, ConcatDataset, ReducedDataset, SubDataset, TransformedDataset,
};
pub use dataset::{Dataset, Sample};
pub use sources::{CustomDataset, FeatureDataset};
pub use transform::{
    Compose, LabelTransform, Normalize, OffsetLabel, RemapLabels, Transform, UnNormalize,
};
