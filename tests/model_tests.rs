mod common;

use common::{create_gradient_image, create_test_image, example_model};
use image::Rgb;
use matching_viewer::*;

#[test]
fn test_align_dimensions() {
    let a = create_test_image(30, 20, 10);
    let b = create_test_image(15, 40, 200);
    let aligned = align(&a, &b);

    assert_eq!(aligned.dimensions(), (45, 40));
    assert_eq!(*aligned.get_pixel(0, 0), Rgb([10, 10, 10]));
    assert_eq!(*aligned.get_pixel(30, 39), Rgb([200, 200, 200]));
    // below the shorter left image
    assert_eq!(*aligned.get_pixel(5, 30), Rgb([0, 0, 0]));
}

#[test]
fn test_merge_extremes_reproduce_inputs() {
    let a = create_gradient_image(24, 16);
    let b = create_test_image(24, 16, 77);

    assert_eq!(merge(&a, &b, 1.0).unwrap(), a);
    assert_eq!(merge(&a, &b, 0.0).unwrap(), b);
}

#[test]
fn test_merge_half_blend() {
    let a = create_test_image(4, 4, 200);
    let b = create_test_image(4, 4, 100);
    let merged = merge(&a, &b, 0.5).unwrap();
    assert!(merged.pixels().all(|p| *p == Rgb([150, 150, 150])));
}

#[test]
fn test_merge_rejects_bad_inputs() {
    let a = create_test_image(4, 4, 0);
    let b = create_test_image(5, 4, 0);
    assert!(merge(&a, &b, 0.5).is_err());
    assert!(merge(&a, &a, 1.5).is_err());
    assert!(merge(&a, &a, -0.1).is_err());
}

#[test]
fn test_composites_follow_image_changes() {
    let mut model = MatchingModel::new();
    assert!(model.align_image().is_none());

    model.set_image(0, create_test_image(10, 8, 50)).unwrap();
    assert!(model.align_image().is_none());

    model.set_image(1, create_test_image(10, 8, 150)).unwrap();
    assert_eq!(model.align_image().unwrap().dimensions(), (20, 8));
    assert_eq!(*model.merge_image().unwrap().get_pixel(0, 0), Rgb([50, 50, 50]));
    assert_eq!(model.align_offset(), 10);

    model.set_alpha(0.0).unwrap();
    assert_eq!(*model.merge_image().unwrap().get_pixel(0, 0), Rgb([150, 150, 150]));

    model.set_image(1, create_test_image(6, 12, 150)).unwrap();
    assert_eq!(model.align_image().unwrap().dimensions(), (16, 12));
    assert!(model.merge_image().is_none());
}

#[test]
fn test_invalid_image_index() {
    let mut model = MatchingModel::new();
    assert!(model.set_image(2, create_test_image(2, 2, 0)).is_err());
    assert!(model.image(0).is_err());
    assert!(model.points(3).is_err());
    assert!(model.set_alpha(2.0).is_err());
    assert_eq!(model.alpha(), 1.0);
}

#[test]
fn test_matching_length_must_agree() {
    let mut model = example_model();

    assert!(model
        .set_matching(vec![Correspondence::new(0, 0)], vec![0.1, 0.2])
        .is_err());
    // rejected call leaves the previous matching in place
    assert_eq!(model.number_of_correspondences(), 3);

    assert!(model.set_energy(vec![1.0]).is_err());
    model.set_energy(vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(model.energy(), &[1.0, 2.0, 3.0]);

    model
        .set_matching(vec![Correspondence::new(1, 1)], vec![0.5])
        .unwrap();
    assert_eq!(model.correspondences(), &[Correspondence::new(1, 1)]);
    assert_eq!(model.number_of_correspondences(), 1);
}

#[test]
fn test_correspondence_resolution() {
    let points0 = vec![Point2::new(1, 2), Point2::new(3, 4)];
    let points1 = vec![Point2::new(5, 6)];

    assert_eq!(
        Correspondence::new(1, 0).resolve(&points0, &points1),
        Some((Point2::new(3, 4), Point2::new(5, 6)))
    );
    assert!(!Correspondence::unmatched(0).is_matched());
    assert_eq!(Correspondence::unmatched(0).resolve(&points0, &points1), None);
    assert_eq!(Correspondence::new(2, 0).resolve(&points0, &points1), None);
    assert_eq!(Correspondence::new(0, 1).resolve(&points0, &points1), None);
}

#[test]
fn test_three_way_layers() {
    let mut model = MatchingModel::with_mode(LayerMode::ThreeWay);
    model
        .set_matching(vec![Correspondence::new(0, 0)], vec![0.4])
        .unwrap();

    let proposed = CorrespondenceLayer::new(vec![Correspondence::new(0, 1)], vec![0.3]).unwrap();
    model.set_layer(LayerName::Proposed, proposed.clone()).unwrap();
    assert!(model
        .set_layer(LayerName::Primary, CorrespondenceLayer::default())
        .is_err());

    let names: Vec<LayerName> = model.layers().map(|(name, _)| name).collect();
    assert_eq!(names, vec![LayerName::Current, LayerName::Proposed, LayerName::Fused]);
    assert_eq!(model.layer(LayerName::Proposed).unwrap(), &proposed);
    assert_eq!(model.energy(), &[0.4]);

    model.set_mode(LayerMode::Single);
    assert_eq!(model.number_of_correspondences(), 0);
    assert!(model.layer(LayerName::Proposed).is_err());
}
