#[cfg(test)]
mod tests {
    use compresso::{
        compress, CompressError, Compressor, JpegQualityEncoder, Loader, OutputFormat,
        QualityEncoder, Resizer, Tier, MIB,
    };
    use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) % 256) as u8 / 2 + 64,
            ])
        }))
    }

    /// Deterministic per-pixel noise; JPEG cannot compress it much at any quality.
    fn noise(width: u32, height: u32) -> DynamicImage {
        let mut state: u32 = 0x9E37_79B9;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        };
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| {
            let v = next();
            Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
        }))
    }

    fn translucent(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([200, (x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    fn jpeg_bytes(image: &DynamicImage) -> Vec<u8> {
        JpegQualityEncoder.encode(image, 90).unwrap()
    }

    #[test]
    fn test_tier_table() {
        let ultra = Tier::Ultra.settings();
        assert_eq!(ultra.target_bytes, 0.2 * MIB as f64);
        assert!(ultra.fits(209_715));
        assert!(ultra.is_under(209_715));
        assert!(!ultra.fits(209_716));
        assert_eq!(ultra.max_dimension, 1200);
        assert_eq!(ultra.quality_range, (30, 60));
        assert_eq!(ultra.initial_quality, 40);

        let super_tier = Tier::Super.settings();
        assert_eq!(super_tier.target_bytes, 512.0 * 1024.0);
        assert!(super_tier.fits(512 * 1024));
        assert!(!super_tier.is_under(512 * 1024));
        assert_eq!(super_tier.max_dimension, 2000);
        assert_eq!(super_tier.quality_range, (50, 80));
        assert_eq!(super_tier.initial_quality, 65);

        let normal = Tier::Normal.settings();
        assert_eq!(normal.target_bytes, 2.0 * 1024.0 * 1024.0);
        assert_eq!(normal.max_dimension, 4000);
        assert_eq!(normal.quality_range, (75, 95));
        assert_eq!(normal.initial_quality, 85);

        assert_eq!(Tier::default(), Tier::Normal);
        for tier in Tier::ALL {
            assert!(tier.settings().validate().is_ok());
        }
    }

    #[test]
    fn test_lenient_names() {
        assert_eq!(Tier::from_name("ULTRA"), Tier::Ultra);
        assert_eq!(Tier::from_name("super"), Tier::Super);
        assert_eq!(Tier::from_name("extreme"), Tier::Normal);

        assert_eq!(OutputFormat::from_name("webp"), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_name("PNG"), OutputFormat::Png);
        assert_eq!(OutputFormat::from_name("jpg"), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_name("gif"), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg);
    }

    #[test]
    fn test_fitted_dimensions() {
        assert_eq!(Resizer::fitted_dimensions(6000, 4000, 4000), (4000, 2666));
        assert_eq!(Resizer::fitted_dimensions(1000, 3000, 2000), (666, 2000));
        assert_eq!(Resizer::fitted_dimensions(1200, 1200, 1200), (1200, 1200));
        assert_eq!(Resizer::fitted_dimensions(500, 300, 1200), (500, 300));
        assert_eq!(Resizer::fitted_dimensions(10000, 1, 1200), (1200, 1));
    }

    #[test]
    fn test_large_photo_normal_tier_jpeg() {
        let settings = Tier::Normal.settings();
        let result = Compressor::new()
            .compress(gradient(6000, 4000), settings, OutputFormat::Jpeg)
            .unwrap();

        assert_eq!((result.width, result.height), (4000, 2666));
        assert!(result.size() <= 2 * MIB);

        let quality = result.quality.unwrap();
        assert!((75..=95).contains(&quality));

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(image::guess_format(&result.bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(decoded.dimensions(), (4000, 2666));
        assert!(!decoded.color().has_alpha());
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_small_image_exits_after_initial_encode() {
        let result = compress(&jpeg_bytes(&gradient(64, 48)), Tier::Normal, OutputFormat::Jpeg).unwrap();

        assert_eq!(result.quality, Some(85));
        assert_eq!(result.encode_passes, 1);
        assert_eq!((result.width, result.height), (64, 48));
    }

    #[test]
    fn test_rgba_png_ultra_keeps_alpha_and_size() {
        let result = Compressor::new()
            .compress(translucent(500, 500), Tier::Ultra.settings(), OutputFormat::Png)
            .unwrap();

        assert_eq!(result.quality, None);
        assert_eq!(result.encode_passes, 1);
        assert_eq!(image::guess_format(&result.bytes).unwrap(), ImageFormat::Png);

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(decoded.dimensions(), (500, 500));
        assert!(decoded.color().has_alpha());
    }

    #[test]
    fn test_opaque_png_has_no_alpha() {
        let result = Compressor::new()
            .compress(gradient(120, 80), Tier::Super.settings(), OutputFormat::Png)
            .unwrap();

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_high_entropy_image_succeeds_best_effort() {
        let image = noise(1200, 1200);
        let settings = Tier::Ultra.settings();
        let initial_size = JpegQualityEncoder.encode(&image, settings.initial_quality).unwrap().len() as u64;

        let result = Compressor::new().compress(image, settings, OutputFormat::Jpeg).unwrap();
        let quality = result.quality.unwrap();

        assert_eq!((result.width, result.height), (1200, 1200));
        assert!((30..=60).contains(&quality));
        assert!(result.size() <= initial_size);

        if !settings.fits(initial_size) {
            assert_eq!(result.encode_passes, 5);
            if result.within_budget(settings) {
                assert!(quality < settings.initial_quality);
            } else {
                // Nothing fit, so the initial quality is re-encoded.
                assert_eq!(quality, settings.initial_quality);
                assert_eq!(result.size(), initial_size);
            }
        }
    }

    #[test]
    fn test_jpeg_output_flattens_alpha_onto_background() {
        let transparent = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 0])));
        let result = Compressor::new()
            .compress(transparent, Tier::Super.settings(), OutputFormat::Jpeg)
            .unwrap();

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert!(!decoded.color().has_alpha());

        let pixel = decoded.to_rgb8().get_pixel(32, 32).0;
        assert!(pixel.iter().all(|&c| c > 240), "expected white, got {:?}", pixel);
    }

    #[test]
    fn test_custom_background() {
        let transparent = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 0])));
        let result = Compressor::new()
            .with_background([0, 0, 0])
            .compress(transparent, Tier::Super.settings(), OutputFormat::Jpeg)
            .unwrap();

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        let pixel = decoded.to_rgb8().get_pixel(10, 10).0;
        assert!(pixel.iter().all(|&c| c < 16), "expected black, got {:?}", pixel);
    }

    #[test]
    fn test_webp_preserves_alpha_presence() {
        let compressor = Compressor::new();

        let with_alpha = compressor
            .compress(translucent(200, 100), Tier::Super.settings(), OutputFormat::WebP)
            .unwrap();
        assert_eq!(image::guess_format(&with_alpha.bytes).unwrap(), ImageFormat::WebP);
        let decoded = image::load_from_memory(&with_alpha.bytes).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.dimensions(), (200, 100));

        let opaque = compressor
            .compress(gradient(200, 100), Tier::Super.settings(), OutputFormat::WebP)
            .unwrap();
        let decoded = image::load_from_memory(&opaque.bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        assert!(opaque.quality.is_some());
    }

    #[test]
    fn test_resize_bound_and_aspect_ratio() {
        let result = Compressor::new()
            .compress(gradient(3000, 1000), Tier::Super.settings(), OutputFormat::Jpeg)
            .unwrap();

        assert_eq!(result.width, 2000);
        let expected_height = 1000.0 * 2000.0 / 3000.0;
        assert!((result.height as f64 - expected_height).abs() <= 1.0);
    }

    #[test]
    fn test_no_upscale() {
        let result = Compressor::new()
            .compress(gradient(800, 600), Tier::Ultra.settings(), OutputFormat::Jpeg)
            .unwrap();

        assert_eq!((result.width, result.height), (800, 600));
    }

    #[test]
    fn test_garbage_input_is_decode_error() {
        let result = compress(b"definitely not an image", Tier::Normal, OutputFormat::Jpeg);
        assert!(matches!(result, Err(CompressError::Decode(_))));

        let result = compress(&[], Tier::Normal, OutputFormat::Jpeg);
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_loader_dimension_ceiling() {
        let data = jpeg_bytes(&gradient(100, 100));

        let result = Loader::new().with_max_dimensions(50, 50).load_from_bytes(&data);
        assert!(matches!(result, Err(CompressError::MemoryLimitExceeded(_))));

        let image = Loader::new().with_max_dimensions(100, 100).load_from_bytes(&data).unwrap();
        assert_eq!(image.dimensions(), (100, 100));
    }
}
