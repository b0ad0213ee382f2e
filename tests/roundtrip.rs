use catshuffle::{
    scramble, scramble_bytes, unscramble, unscramble_bytes, CatMapParams, Error, FormatError,
    RasterBuffer,
};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, ImageFormat};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_container(rng: &mut Xoshiro256StarStar, width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0u8; (width * height * 3) as usize];
    rng.fill(&mut data[..]);

    let mut bytes = format!("P6\n{} {}\n255\n", width, height).into_bytes();
    bytes.extend_from_slice(&data);
    bytes
}

#[test]
fn random_images_survive_round_trip() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);

    for n in [1, 2, 3, 5, 16, 257] {
        let bytes = random_container(&mut rng, n, n);
        let im = RasterBuffer::decode(&bytes).unwrap();
        assert_eq!(im.encode(), bytes);

        for iterations in [0, 1, 2, 50] {
            let scrambled = scramble_bytes(&bytes, iterations).unwrap();
            if iterations == 0 {
                assert_eq!(scrambled, bytes);
            }
            assert_eq!(
                unscramble_bytes(&scrambled, iterations).unwrap(),
                bytes,
                "n={n} iterations={iterations}"
            );
        }
    }
}

#[test]
fn huge_iteration_counts() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);
    let im = RasterBuffer::decode(&random_container(&mut rng, 64, 64)).unwrap();

    for iterations in [u64::MAX, u64::MAX - 1, 1 << 40] {
        let params = CatMapParams::new(iterations);
        let scrambled = scramble(&im, &params).unwrap();
        assert_eq!(unscramble(&scrambled, &params).unwrap(), im);
    }
}

#[test]
fn scrambled_image_differs() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    let im = RasterBuffer::decode(&random_container(&mut rng, 32, 32)).unwrap();

    let scrambled = scramble(&im, &CatMapParams::new(5)).unwrap();
    assert_ne!(scrambled, im);
}

#[test]
fn non_square_leaves_no_output() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);
    let bytes = random_container(&mut rng, 4, 3);

    assert_eq!(
        scramble_bytes(&bytes, 1).unwrap_err(),
        Error::Shape {
            width: 4,
            height: 3
        }
    );
    assert!(matches!(
        unscramble_bytes(&bytes, 1),
        Err(Error::Shape { .. })
    ));
}

#[test]
fn truncated_container_rejected() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(2);
    let bytes = random_container(&mut rng, 5, 5);

    assert!(matches!(
        scramble_bytes(&bytes[..bytes.len() - 1], 1),
        Err(Error::Format(FormatError::Truncated { .. }))
    ));
}

#[test]
fn encoded_output_reads_as_pnm() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(3);
    let bytes = random_container(&mut rng, 9, 9);
    let scrambled = scramble_bytes(&bytes, 4).unwrap();

    let im = image::load_from_memory_with_format(&scrambled, ImageFormat::Pnm)
        .unwrap()
        .into_rgb8();
    let ours = RasterBuffer::decode(&scrambled).unwrap();

    assert_eq!((im.width(), im.height()), (9, 9));
    for (x, y, p) in im.enumerate_pixels() {
        assert_eq!(ours.get(y as usize, x as usize).unwrap(), p.0);
    }
}

#[test]
fn decodes_pnm_encoder_output() {
    init_logger();
    let mut rng = Xoshiro256StarStar::seed_from_u64(4);
    let mut data = vec![0u8; 6 * 6 * 3];
    rng.fill(&mut data[..]);

    let mut bytes = Vec::new();
    PnmEncoder::new(&mut bytes)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(&data, 6, 6, ColorType::Rgb8)
        .unwrap();

    let im = RasterBuffer::decode(&bytes).unwrap();
    assert_eq!(im.as_array().iter().copied().collect::<Vec<_>>(), data);

    let restored = unscramble(&scramble(&im, &CatMapParams::new(11)).unwrap(), &CatMapParams::new(11));
    assert_eq!(restored.unwrap(), im);
}
