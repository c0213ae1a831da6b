use maskwork_frame_model::{Clip, Frame, FrameFormat, PixelRect};
use maskwork_mask_core::edge::{EdgeDetector, EdgeOperator, MaskParams};
use maskwork_mask_core::morph::{expand_plane, inpand_plane, XxpandMode};
use maskwork_mask_core::region::{masked_merge, replace_squaremask, squaremask};
use maskwork_mask_core::{all_edge_masks, morph};

/// A dark frame with a bright centered square, the standard fixture for
/// edge and morphology checks.
fn square_frame(size: usize, inset: usize) -> Frame {
    let mut frame = Frame::blank(FrameFormat::GRAY8, size, size, 0.0);
    for y in inset..size - inset {
        for x in inset..size - inset {
            frame.plane_mut(0).set(x, y, 255.0);
        }
    }
    frame
}

#[test]
fn edge_masks_outline_a_square() {
    let frame = square_frame(24, 8);

    for op in [
        EdgeOperator::Sobel,
        EdgeOperator::Prewitt,
        EdgeOperator::Kirsch,
        EdgeOperator::ExSobel,
        EdgeOperator::FreyChen,
    ] {
        let mask = EdgeDetector::new(op)
            .edge_mask(&frame, &MaskParams::default())
            .unwrap();
        let plane = mask.plane(0);

        // The square's border must respond...
        assert!(plane.get(8, 12) > 0.0, "{} missed the left edge", op.name());
        assert!(plane.get(12, 8) > 0.0, "{} missed the top edge", op.name());
        // ...while flat interior and exterior stay silent.
        assert_eq!(plane.get(12, 12), 0.0, "{} fired inside", op.name());
        assert_eq!(plane.get(2, 2), 0.0, "{} fired outside", op.name());
    }
}

#[test]
fn binarized_mask_survives_expand_then_inpand() {
    let frame = square_frame(24, 8);
    let mask = EdgeDetector::new(EdgeOperator::Sobel)
        .edge_mask(&frame, &MaskParams::with_thresholds(100.0, Some(101.0)))
        .unwrap();

    let grown = expand_plane(mask.plane(0), 2, 2, XxpandMode::Ellipse);
    let reopened = inpand_plane(&grown, 2, 2, XxpandMode::Ellipse);

    // Closing never loses mask pixels.
    for (orig, closed) in mask.plane(0).data().iter().zip(reopened.data()) {
        assert!(closed >= orig);
    }
    // And the grown mask is a superset of the reopened one.
    for (closed, open) in reopened.data().iter().zip(grown.data()) {
        assert!(open >= closed);
    }
}

#[test]
fn catalog_sweep_is_stable_across_formats() {
    let frame8 = square_frame(16, 5);
    let masks8 = all_edge_masks(&frame8, &MaskParams::default()).unwrap();
    assert_eq!(masks8.len(), EdgeOperator::all().len());

    let frame16 = maskwork_frame_model::depth::to_depth(&frame8, 16).unwrap();
    let masks16 = all_edge_masks(&frame16, &MaskParams::default()).unwrap();

    for ((name8, mask8), (name16, mask16)) in masks8.iter().zip(&masks16) {
        assert_eq!(name8, name16);
        assert_eq!(mask8.format(), frame8.format(), "{name8}");
        assert_eq!(mask16.format(), frame16.format(), "{name16}");
    }
}

#[test]
fn masked_square_replacement_over_a_clip() {
    let base = Clip::repeated(Frame::blank(FrameFormat::GRAY8, 16, 16, 20.0), 6);
    let overlay = Clip::repeated(Frame::blank(FrameFormat::GRAY8, 16, 16, 240.0), 6);
    let rect = PixelRect::new(4, 4, 8, 8);

    let result = replace_squaremask(&base, &overlay, rect, Some(&[(2, 4)]), None, false).unwrap();

    // Outside the range: untouched.
    let before = result.frame(0).unwrap();
    assert_eq!(before.plane(0).get(8, 8), 20.0);

    // Inside the range: replaced within the rectangle, kept elsewhere.
    let during = result.frame(3).unwrap();
    assert_eq!(during.plane(0).get(8, 8), 240.0);
    assert_eq!(during.plane(0).get(1, 1), 20.0);
}

#[test]
fn minmax_equals_expand_minus_inpand_on_luma() {
    let frame = square_frame(20, 6);
    let rady = 2;

    let mask = EdgeDetector::new(EdgeOperator::MinMax { rady, radc: 0 })
        .edge_mask(&frame, &MaskParams::default())
        .unwrap();

    let grown = morph::expand_plane(frame.plane(0), rady, rady, XxpandMode::Ellipse);
    let shrunk = morph::inpand_plane(frame.plane(0), rady, rady, XxpandMode::Ellipse);
    let expected = grown.zip_map(&shrunk, |a, b| a - b).unwrap();

    assert_eq!(mask.plane(0), &expected);
}

#[test]
fn square_mask_merge_composites_two_sources() {
    let a = square_frame(16, 6);
    let b = Frame::blank(FrameFormat::GRAY8, 16, 16, 77.0);
    let mask = squaremask(&a, PixelRect::new(0, 0, 8, 16), false).unwrap();

    let merged = masked_merge(&a, &b, &mask).unwrap();
    // Left half comes from b, right half keeps a's content.
    assert_eq!(merged.plane(0).get(2, 2), 77.0);
    assert_eq!(merged.plane(0).get(12, 12), a.plane(0).get(12, 12));
}
