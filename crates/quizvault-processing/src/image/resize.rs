/// Target dimensions for an image bounded by `max_dimension` on both axes.
///
/// Aspect ratio is preserved and images are never upscaled. Returns `None`
/// when the image already fits.
pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return None;
    }

    let (width, height, max) = (width as u64, height as u64, max_dimension as u64);
    let (new_width, new_height) = if width >= height {
        (max, ((height * max + width / 2) / width).max(1))
    } else {
        (((width * max + height / 2) / height).max(1), max)
    };

    Some((new_width as u32, new_height as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_already() {
        assert_eq!(fit_within(2048, 2048, 2048), None);
        assert_eq!(fit_within(100, 50, 2048), None);
    }

    #[test]
    fn test_square() {
        assert_eq!(fit_within(3000, 3000, 2048), Some((2048, 2048)));
    }

    #[test]
    fn test_preserves_aspect_ratio() {
        assert_eq!(fit_within(4096, 2048, 2048), Some((2048, 1024)));
        assert_eq!(fit_within(1000, 3000, 2048), Some((683, 2048)));
    }

    #[test]
    fn test_extreme_aspect_ratio_keeps_one_pixel() {
        assert_eq!(fit_within(100_000, 1, 2048), Some((2048, 1)));
    }
}
