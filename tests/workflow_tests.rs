//! Integration tests for imageops-filter workflows
//!
//! These tests drive a `FilterEngine` through several filters in a row,
//! simulating real-world usage scenarios.

use image::{DynamicImage, Luma};
use imageops_filter::{
    buffer_from_raw, Coverage, FilterEngine, FilterOptions, Image, Kernel, LinearFilterExt,
    MedianFilterExt, SpatialDistance,
};
use itertools::iproduct;

/// Test helper to create a 16x16 image: dark background, bright square, one hot pixel
fn create_test_image() -> Image<Luma<u8>> {
    let mut image: Image<Luma<u8>> = Image::new(16, 16);

    iproduct!(0..16u32, 0..16u32).for_each(|(y, x)| {
        let value = if (4..12).contains(&x) && (4..12).contains(&y) {
            180
        } else {
            60
        };
        image.put_pixel(x, y, Luma([value]));
    });

    // Salt noise in the background
    image.put_pixel(1, 13, Luma([255]));
    image
}

/// Test helper to create a horizontal gradient
fn create_gradient_image(width: u32, height: u32) -> Image<Luma<u8>> {
    Image::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8]))
}

#[test]
fn mean_median_gaussian_bilateral_on_same_source() {
    // Workflow: each filter reads the loaded source, the last one wins
    let image = create_test_image();
    let mut engine = FilterEngine::new();
    engine.load_source(&image).expect("Load should succeed");

    engine
        .apply_linear(&Kernel::mean(3).unwrap())
        .expect("Mean filter should succeed");
    let mean = engine.result().clone();

    engine.apply_median(3).expect("Median filter should succeed");
    let median = engine.result().clone();

    engine
        .apply_linear(&Kernel::gaussian(5, 1.0).unwrap())
        .expect("Gaussian filter should succeed");
    let gaussian = engine.result().clone();

    engine
        .apply_bilateral(5, 15.0, 2.0)
        .expect("Bilateral filter should succeed");

    // The source itself is never touched
    let source = engine.source().expect("Source should be loaded");
    assert_eq!(source.get_pixel(1, 13).0[0], 255.0);

    // Results match the stateless extension traits
    assert_eq!(mean, image.convolve(&Kernel::mean(3).unwrap()).unwrap());
    assert_eq!(median, image.median_filter(3).unwrap());
    assert_eq!(
        gaussian,
        image.convolve(&Kernel::gaussian(5, 1.0).unwrap()).unwrap()
    );

    // Median removes the hot pixel, mean only spreads it
    assert_eq!(median.get_pixel(1, 13).0[0], 60.0);
    assert!(mean.get_pixel(1, 13).0[0] > 60.0);

    // Bilateral keeps the square's edge sharp
    let result = engine.result();
    assert!((result.get_pixel(4, 8).0[0] - 180.0).abs() < 1.0);
    assert!((result.get_pixel(3, 8).0[0] - 60.0).abs() < 1.0);
    assert_eq!(engine.unwritten_cells(), 0);
}

#[test]
fn loading_a_new_source_resets_the_result() {
    let mut engine = FilterEngine::from_image(&create_test_image()).unwrap();
    engine.apply_bilateral(3, 20.0, 1.0).unwrap();
    assert_eq!(engine.result().dimensions(), (16, 16));

    // Workflow: swap in a differently sized image and filter again
    let gradient = create_gradient_image(12, 7);
    engine.load_source(&gradient).unwrap();
    assert_eq!(engine.result().dimensions(), (12, 7));
    assert_eq!(engine.unwritten_cells(), 12 * 7);

    engine.apply_bilateral(3, 20.0, 1.0).unwrap();
    assert_eq!(engine.unwritten_cells(), 0);
    assert_eq!(engine.source().unwrap().dimensions(), (12, 7));
}

#[test]
fn commit_result_chains_filters() {
    let image = create_test_image();
    let mut engine = FilterEngine::from_image(&image).unwrap();

    // Workflow: median → commit → mean
    engine
        .apply_median(3)
        .and_then(FilterEngine::commit_result)
        .and_then(|engine| engine.apply_linear(&Kernel::mean(3).unwrap()))
        .expect("Chained filters should succeed");

    let median = image.median_filter(3).unwrap();
    let expected = median.convolve(&Kernel::mean(3).unwrap()).unwrap();
    assert_eq!(engine.result(), &expected);
}

#[test]
fn commit_without_source_fails() {
    let mut engine = FilterEngine::new();
    assert!(engine.commit_result().is_err());
}

#[test]
fn truncated_options_leave_a_nan_tail() {
    let image = create_gradient_image(10, 8);
    let mut engine = FilterEngine::with_options(FilterOptions::truncated());
    assert_eq!(engine.options().coverage, Coverage::Truncated);
    assert_eq!(engine.options().spatial_distance, SpatialDistance::KernelIndex);

    engine.load_source(&image).unwrap();
    engine.apply_linear(&Kernel::gaussian(5, 1.0).unwrap()).unwrap();

    // Offset 2: the last two rows and columns stay unwritten
    assert_eq!(engine.unwritten_cells(), 10 * 8 - 8 * 6);
    let result = engine.result();
    assert!(!result.get_pixel(7, 5).0[0].is_nan());
    assert!(result.get_pixel(8, 0).0[0].is_nan());
    assert!(result.get_pixel(0, 6).0[0].is_nan());

    // Bilateral always fills the whole grid
    engine.apply_bilateral(5, 30.0, 2.0).unwrap();
    assert_eq!(engine.unwritten_cells(), 0);
}

#[test]
fn switching_options_between_filters() {
    let image = create_gradient_image(9, 9);
    let mut engine = FilterEngine::from_image(&image).unwrap();

    engine
        .set_options(FilterOptions::new().with_coverage(Coverage::Truncated))
        .apply_median(3)
        .unwrap();
    assert_eq!(engine.unwritten_cells(), 9 + 8);

    // Full coverage writes every cell of the same result buffer
    engine.set_options(FilterOptions::new()).apply_median(3).unwrap();
    assert_eq!(engine.unwritten_cells(), 0);
}

#[test]
fn spatial_distance_changes_bilateral_output() {
    let image = create_test_image();
    let mut centered = FilterEngine::from_image(&image).unwrap();
    let mut kernel_index = FilterEngine::with_options(
        FilterOptions::new().with_spatial_distance(SpatialDistance::KernelIndex),
    );
    kernel_index.load_source(&image).unwrap();

    centered.apply_bilateral(5, 200.0, 2.0).unwrap();
    kernel_index.apply_bilateral(5, 200.0, 2.0).unwrap();
    assert_ne!(centered.result(), kernel_index.result());
}

#[test]
fn export_to_u8_rounds_and_clamps() {
    let buffer = buffer_from_raw(4, 1, vec![-12.0, 99.6, 300.0, f64::NAN]).unwrap();
    let mut engine = FilterEngine::new();
    engine.load_buffer(buffer).unwrap();

    // Identity copies the samples unchanged into the result
    engine.apply_linear(&Kernel::identity(1).unwrap()).unwrap();
    let exported = engine.result_as::<u8>();
    assert_eq!(exported.as_raw(), &vec![0, 100, 255, 0]);
}

#[test]
fn dynamic_image_is_converted_to_luma() {
    let gray = create_gradient_image(6, 4);
    let dynamic = DynamicImage::ImageLuma8(gray.clone());

    let mut engine = FilterEngine::new();
    engine.load_dynamic(&dynamic).unwrap();
    engine.apply_median(1).unwrap();

    assert_eq!(engine.result_as::<u8>(), gray);
}

#[test]
fn independent_engines_do_not_share_state() {
    let mut first = FilterEngine::from_image(&create_test_image()).unwrap();
    let mut second = FilterEngine::from_image(&create_gradient_image(5, 5)).unwrap();

    first.apply_median(3).unwrap();
    second.apply_linear(&Kernel::mean(3).unwrap()).unwrap();

    assert_eq!(first.result().dimensions(), (16, 16));
    assert_eq!(second.result().dimensions(), (5, 5));
    assert_eq!(first.source().unwrap().get_pixel(1, 13).0[0], 255.0);
}
