use rowslope_core::calculator::{slope_percent, slope_ratio, Projection};

#[test]
fn slope_ignores_direction_of_travel() {
    assert!((slope_percent(110.0, 100.0, 50.0) - 20.0).abs() < 1e-12);
    assert!((slope_percent(100.0, 110.0, -50.0) - 20.0).abs() < 1e-12);
    assert!((slope_ratio(100.0, 110.0, 50.0) - 0.2).abs() < 1e-12);
}

#[test]
fn exact_five_percent_stays_five() {
    assert_eq!(slope_percent(1.0, 0.0, 20.0), 5.0);
}

#[test]
fn projection_keeps_pile_side_of_center() {
    let north_of_center = Projection::new(85.0, 75.0, 0.2);
    let adjusted = north_of_center.adjusted_y(75.0).unwrap();
    assert!(adjusted > 75.0 && adjusted < 85.0);

    let south_of_center = Projection::new(65.0, 75.0, 0.2);
    let adjusted = south_of_center.adjusted_y(75.0).unwrap();
    assert!(adjusted < 75.0 && adjusted > 65.0);
}

#[test]
fn reduced_distance_closes_the_triangle() {
    for (pile_y, ratio) in [(85.0, 0.2), (12.5, 0.07), (-40.0, 0.999), (300.0, 0.5)] {
        let projection = Projection::new(pile_y, 10.0, ratio);
        let reduced = projection.reduced_distance().unwrap();
        let hypotenuse = (reduced.powi(2) + projection.theoretical_delta_z.powi(2)).sqrt();
        assert!(
            (hypotenuse - projection.hypotenuse_y).abs() < 1e-9,
            "pile_y={pile_y} ratio={ratio}"
        );
    }
}

#[test]
fn vertical_leg_longer_than_hypotenuse_fails() {
    let projection = Projection::new(85.0, 75.0, 1.5);
    assert!(projection.reduced_distance().is_none());
    assert!(projection.adjusted_y(75.0).is_none());
}

#[test]
fn forty_five_degrees_collapses_to_center() {
    let projection = Projection::new(85.0, 75.0, 1.0);
    assert_eq!(projection.reduced_distance(), Some(0.0));
    assert_eq!(projection.adjusted_y(75.0), Some(75.0));
}
