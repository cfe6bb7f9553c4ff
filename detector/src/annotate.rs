use image::{Rgb, RgbImage};
use trash_cam_common::detection::BoundingBox;

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const STROKE_WIDTH: i32 = 2;

/// Outline every box on the image in [`BOX_COLOR`] with a [`STROKE_WIDTH`] stroke.
///
/// The stroke lies entirely inside each box rather than centred on its
/// edge, so nothing is drawn outside the reported rectangle.
pub fn draw_boxes(image: &mut RgbImage, boxes: &[BoundingBox]) {
    for bbox in boxes {
        draw_outline(image, bbox, BOX_COLOR, STROKE_WIDTH);
    }
}

/// Hollow rectangle with the stroke laid inside the box edge. Anything
/// outside the image is clipped; empty boxes draw nothing.
fn draw_outline(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, stroke: i32) {
    if bbox.is_empty() || stroke <= 0 {
        return;
    }

    // i64 so boxes near i32::MAX can't overflow
    let stroke = i64::from(stroke);
    let left = i64::from(bbox.x);
    let top = i64::from(bbox.y);
    let right = left + i64::from(bbox.width);
    let bottom = top + i64::from(bbox.height);

    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = right.min(i64::from(image.width()));
    let y1 = bottom.min(i64::from(image.height()));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for y in y0..y1 {
        let on_horizontal_edge = y < top + stroke || y >= bottom - stroke;
        if on_horizontal_edge {
            for x in x0..x1 {
                image.put_pixel(x as u32, y as u32, color);
            }
        } else {
            for x in (left..left + stroke).chain(right - stroke..right) {
                if x >= x0 && x < x1 {
                    image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn blank(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, BLACK)
    }

    #[test]
    fn outline_has_two_pixel_stroke() {
        let mut img = blank(10, 10);
        draw_boxes(&mut img, &[BoundingBox::new(2, 2, 6, 6)]);

        assert_eq!(*img.get_pixel(2, 2), BOX_COLOR);
        assert_eq!(*img.get_pixel(3, 3), BOX_COLOR);
        assert_eq!(*img.get_pixel(7, 7), BOX_COLOR);
        assert_eq!(*img.get_pixel(2, 5), BOX_COLOR);
        assert_eq!(*img.get_pixel(6, 5), BOX_COLOR);
        // interior and outside stay untouched
        assert_eq!(*img.get_pixel(4, 4), BLACK);
        assert_eq!(*img.get_pixel(5, 5), BLACK);
        assert_eq!(*img.get_pixel(1, 1), BLACK);
        assert_eq!(*img.get_pixel(8, 8), BLACK);

        let green = img.pixels().filter(|p| **p == BOX_COLOR).count();
        // 6x6 box minus its 2x2 interior
        assert_eq!(green, 36 - 4);
    }

    #[test]
    fn drawing_is_deterministic_and_idempotent() {
        let source = RgbImage::from_fn(40, 30, |x, y| Rgb([(x * 6) as u8, (y * 8) as u8, 77]));
        let boxes = [BoundingBox::new(3, 4, 20, 10), BoundingBox::new(25, 0, 30, 30)];

        let mut first = source.clone();
        let mut second = source.clone();
        draw_boxes(&mut first, &boxes);
        draw_boxes(&mut second, &boxes);
        assert_eq!(first, second);

        let mut twice = first.clone();
        draw_boxes(&mut twice, &boxes);
        assert_eq!(twice, first);
    }

    #[test]
    fn boxes_are_clipped_to_image() {
        let mut img = blank(10, 10);
        draw_boxes(&mut img, &[BoundingBox::new(-5, -5, 8, 8)]);
        // box spans x,y in -5..3; its right/bottom stroke is 1..3
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(1, 0), BOX_COLOR);
        assert_eq!(*img.get_pixel(0, 1), BOX_COLOR);
        assert_eq!(*img.get_pixel(2, 2), BOX_COLOR);
        assert_eq!(*img.get_pixel(3, 3), BLACK);

        let mut far = blank(10, 10);
        draw_boxes(
            &mut far,
            &[
                BoundingBox::new(50, 50, 10, 10),
                BoundingBox::new(i32::MAX - 1, 0, i32::MAX, 5),
            ],
        );
        assert_eq!(far, blank(10, 10));
    }

    #[test]
    fn degenerate_boxes_draw_nothing() {
        let mut img = blank(10, 10);
        draw_boxes(
            &mut img,
            &[BoundingBox::new(1, 1, 0, 5), BoundingBox::new(1, 1, 5, -2)],
        );
        assert_eq!(img, blank(10, 10));
    }

    #[test]
    fn thin_box_is_filled() {
        let mut img = blank(10, 10);
        draw_boxes(&mut img, &[BoundingBox::new(4, 4, 1, 3)]);
        assert_eq!(*img.get_pixel(4, 4), BOX_COLOR);
        assert_eq!(*img.get_pixel(4, 5), BOX_COLOR);
        assert_eq!(*img.get_pixel(4, 6), BOX_COLOR);
        assert_eq!(img.pixels().filter(|p| **p == BOX_COLOR).count(), 3);
    }
}
