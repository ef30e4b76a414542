// Class Split Demo — composing dataset views for a two-task training setup
//
// Starting from one labeled pool, this builds the views a continual-learning
// loop consumes: per-task class filters with compacted labels, a seeded
// train/validation split, and lazy noise augmentation on the training side.
//
// This demo demonstrates:
//   1. Building a leaf dataset from raw columns
//   2. Filtering by class with SubDataset + RemapLabels
//   3. Splitting into train/validation views over a shared source
//   4. Stochastic augmentation via TransformedDataset

use vole_data::{
    split_by_ratio, CustomDataset, Dataset, RandomNoise, RemapLabels, SubDataset,
    TransformedDataset,
};

fn main() {
    println!("=== Vole — Class Split Demo ===");
    println!();

    // 1. One pool of 12 samples across classes 0..4
    let x1: Vec<f64> = (0..12).map(|i| i as f64).collect();
    let x2: Vec<f64> = (0..12).map(|i| (i * i) as f64).collect();
    let y: Vec<f64> = (0..12).map(|i| (i % 4) as f64).collect();
    let pool = CustomDataset::new(x1, x2, y);
    println!("Pool: {} samples, labels {:?}", pool.len(), pool.labels().unwrap());

    // 2. Task views: classes {0,1} as-is, classes {2,3} compacted to {0,1}
    let task_a = SubDataset::new(pool.clone(), &[0, 1]);
    let task_b = SubDataset::with_label_transform(
        pool.clone(),
        &[2, 3],
        Box::new(RemapLabels::new([(2, 0), (3, 1)])),
    );
    println!();
    println!("Task A keeps source indices {:?}", task_a.retained_indices());
    println!("  labels: {:?}", task_a.labels().unwrap());
    println!("Task B keeps source indices {:?}", task_b.retained_indices());
    println!("  labels after remap: {:?}", task_b.labels().unwrap());

    // 3. Seeded split of task A into train/validation views
    let splits = split_by_ratio(task_a, &[0.8, 0.2], 42);
    let (train, val) = (&splits[0], &splits[1]);
    println!();
    println!(
        "Task A split: {} train / {} validation (seed 42)",
        train.len(),
        val.len()
    );

    // 4. Lazy augmentation: noise is re-drawn on every read
    let augmented =
        TransformedDataset::new(&splits[0]).with_transform(Box::new(RandomNoise::new(0.1)));
    let first = augmented.get(0);
    let second = augmented.get(0);
    println!();
    println!("Augmented sample 0, read twice:");
    println!("  {:?}  (label {})", first.input, first.label);
    println!("  {:?}  (label {})", second.input, second.label);

    println!();
    println!("=== Done! ===");
}
