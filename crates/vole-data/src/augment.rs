// Stochastic augmentation — random input transforms, re-drawn on every access
//
// These operate on `Sample::input` treating it as an image in [C, H, W]
// layout (channel-first, row-major). Wrapping a dataset with one of these via
// `TransformedDataset` yields a fresh draw on every read.

use rand::thread_rng;
use rand::Rng;

use crate::dataset::Sample;
use crate::transform::Transform;

/// Randomly flip an image horizontally with probability `p`.
///
/// Expects `input_shape = [C, H, W]`; other ranks pass through unchanged.
#[derive(Debug, Clone)]
pub struct RandomHorizontalFlip {
    pub p: f64,
}

impl RandomHorizontalFlip {
    pub fn new(p: f64) -> Self {
        Self { p }
    }
}

impl Transform for RandomHorizontalFlip {
    fn apply(&self, mut sample: Sample) -> Sample {
        let mut rng = thread_rng();
        if rng.gen::<f64>() >= self.p {
            return sample;
        }
        let shape = &sample.input_shape;
        if shape.len() != 3 {
            return sample;
        }
        let (c, h, w) = (shape[0], shape[1], shape[2]);
        for ch in 0..c {
            for row in 0..h {
                let start = ch * h * w + row * w;
                sample.input[start..start + w].reverse();
            }
        }
        sample
    }
}

/// Add Gaussian noise to the input: `x' = x + N(0, std)`.
#[derive(Debug, Clone)]
pub struct RandomNoise {
    pub std_dev: f64,
}

impl RandomNoise {
    pub fn new(std_dev: f64) -> Self {
        Self { std_dev }
    }
}

impl Transform for RandomNoise {
    fn apply(&self, mut sample: Sample) -> Sample {
        use rand_distr::{Distribution, Normal};
        let normal = Normal::new(0.0, self.std_dev).unwrap();
        let mut rng = thread_rng();
        for v in &mut sample.input {
            *v += normal.sample(&mut rng);
        }
        sample
    }
}

// Tests
