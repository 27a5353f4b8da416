use pointeval_algorithms::{
    comparison::compare_point_clouds,
    filters::{build_src_points_filter, build_tgt_points_filter},
    voxel_grid::voxel_down_sample,
};
use pointeval_core::{
    containers::PointCloud,
    masks::{GroundTruthPlane, ObservationMask},
    nalgebra::{Point3, Vector4},
};
use rand::Rng;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Points on the unit square in the xy-plane, jittered along z by up to `noise`
fn generate_plane(count: usize, noise: f64) -> PointCloud {
    (0..count)
        .into_par_iter()
        .map(|_| {
            let mut rng = rand::thread_rng();
            Point3::new(
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
                1.0 + rng.gen_range(-noise..=noise),
            )
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

fn main() {
    let ground_truth = generate_plane(200000, 0.0);
    let reconstruction = generate_plane(150000, 0.3);
    println!(
        "done generating point clouds: {} ground truth points, {} reconstructed points",
        ground_truth.len(),
        reconstruction.len()
    );

    let ground_truth = voxel_down_sample(&ground_truth, 0.2).unwrap();
    let reconstruction = voxel_down_sample(&reconstruction, 0.2).unwrap();
    println!(
        "downsampled clouds: {} / {}",
        ground_truth.len(),
        reconstruction.len()
    );

    // Everything within x < 8 was observed
    let dims = [9, 11, 3];
    let cells = (0..dims[0] * dims[1] * dims[2])
        .map(|offset| offset / (dims[1] * dims[2]) < 8)
        .collect();
    let mask = ObservationMask::new(dims, cells, Point3::new(0.0, 0.0, 0.0), 1.0).unwrap();
    let plane = GroundTruthPlane::new(Vector4::new(0.0, 0.0, 1.0, 0.0));

    let source_filter = build_src_points_filter(&reconstruction, &mask);
    let target_filter = build_tgt_points_filter(&ground_truth, &plane);

    let comparison = compare_point_clouds(
        &reconstruction,
        &ground_truth,
        0.2,
        &source_filter,
        &target_filter,
    )
    .unwrap();
    println!("{:#?}", comparison.metrics);
}
