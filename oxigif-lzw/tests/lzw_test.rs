use oxigif_lzw::{
    CodecOptions, LzwConfig, LzwDecoder, LzwEncoder, decode_image_data, encode_image_data,
    min_code_size, read_image_data, write_image_data,
};

/// Pseudo-random indices below `palette_size`.
fn generate_indices(len: usize, palette_size: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((seed >> 33) % palette_size as u64) as u8
        })
        .collect()
}

/// Horizontal bands with a few speckles, closer to a real image.
fn generate_image(width: usize, height: usize, palette_size: usize) -> Vec<u8> {
    let noise = generate_indices(width * height, palette_size, 0xC0FFEE);
    (0..width * height)
        .map(|i| {
            if i % 97 == 0 {
                noise[i]
            } else {
                ((i / width / 4) % palette_size) as u8
            }
        })
        .collect()
}

fn roundtrip(indices: &[u8], palette_size: usize) -> Vec<u8> {
    let mut block = Vec::new();
    encode_image_data(&mut block, indices, palette_size).expect("encode failed");
    let decoded = decode_image_data(&mut &block[..]).expect("decode failed");
    assert_eq!(decoded, indices, "palette size {palette_size}");
    block
}

#[test]
fn test_roundtrip_every_palette_size() {
    for palette_size in 1..=256 {
        let len = 500 + palette_size * 13;
        let indices = generate_indices(len, palette_size, palette_size as u64);
        let block = roundtrip(&indices, palette_size);
        assert_eq!(block[0], min_code_size(palette_size).unwrap());
    }
}

#[test]
fn test_roundtrip_image_like() {
    for palette_size in [2, 16, 64, 256] {
        let indices = generate_image(320, 200, palette_size);
        let block = roundtrip(&indices, palette_size);
        println!(
            "palette {:3}: {} indices -> {} bytes ({:.2}x)",
            palette_size,
            indices.len(),
            block.len(),
            indices.len() as f64 / block.len() as f64
        );
        assert!(block.len() < indices.len() / 2);
    }
}

#[test]
fn test_roundtrip_short_inputs() {
    for palette_size in [4, 8, 16, 32, 64, 128, 256] {
        let source = generate_indices(600, palette_size, 7);
        for len in 0..=source.len() {
            roundtrip(&source[..len], palette_size);
        }
    }
}

#[test]
fn test_end_code_width_matches_decoder() {
    let config = LzwConfig::new(2).unwrap();
    let indices = [2, 1, 3, 3, 1, 2, 2, 1, 2, 3, 3, 0, 1];

    let mut encoder = LzwEncoder::new(config);
    let (codes, stats) = encoder.encode_with_stats(&indices).unwrap();
    let mut decoder = LzwDecoder::new(config);
    assert_eq!(decoder.decode(&codes).unwrap(), indices);

    // 16 entries fill 4-bit codes; the decoder reads the end code at 5 bits.
    assert_eq!(encoder.dictionary().len(), 16);
    assert_eq!(encoder.dictionary().current_bits(), 5);
    assert_eq!(decoder.dictionary().current_bits(), 5);
    assert_eq!(stats.max_bits_used, 5);
}

#[test]
fn test_two_color_runs() {
    roundtrip(&[0, 0, 0, 0, 1, 1, 1, 1], 2);
}

#[test]
fn test_repeated_index_widens_codes() {
    let indices = vec![0u8; 300];
    let mut block = Vec::new();
    let info = write_image_data(&mut block, &indices, 2, CodecOptions::default()).unwrap();

    assert!(info.stats.max_bits_used > 3, "width never grew");
    assert_eq!(info.stats.clears, 1);
    assert_eq!(decode_image_data(&mut &block[..]).unwrap(), indices);
}

#[test]
fn test_table_reset_roundtrip() {
    // Random 8-bit data fills the 4096-entry table many times over.
    let indices = generate_indices(100_000, 256, 42);
    let mut block = Vec::new();
    let written = write_image_data(&mut block, &indices, 256, CodecOptions::default()).unwrap();
    assert!(written.stats.clears > 2, "clears: {}", written.stats.clears);
    assert_eq!(written.stats.max_bits_used, 12);

    let (decoded, read) = read_image_data(&mut &block[..], CodecOptions::default()).unwrap();
    assert_eq!(decoded, indices);
    assert_eq!(read.stats.clears, written.stats.clears);
    assert_eq!(read.stats.codes, written.stats.codes);
}

#[test]
fn test_table_reset_small_code_size() {
    let indices = generate_indices(60_000, 4, 9);
    let mut block = Vec::new();
    let info = write_image_data(&mut block, &indices, 4, CodecOptions::default()).unwrap();
    assert!(info.stats.clears > 1);
    assert_eq!(decode_image_data(&mut &block[..]).unwrap(), indices);
}

#[test]
fn test_dictionaries_stay_in_step() {
    for (palette_size, len) in [(2, 50), (4, 100), (16, 2000), (256, 3000), (256, 50_000)] {
        let config = LzwConfig::for_palette(palette_size).unwrap();
        let indices = generate_indices(len, palette_size, len as u64);

        let mut encoder = LzwEncoder::new(config);
        let codes = encoder.encode(&indices).unwrap();
        let mut decoder = LzwDecoder::new(config);
        let decoded = decoder.decode(&codes).unwrap();

        assert_eq!(decoded, indices);
        assert_eq!(
            encoder.dictionary().learned(),
            decoder.dictionary().learned(),
            "palette {palette_size}, {len} indices"
        );
    }
}

#[test]
fn test_early_change_roundtrip() {
    let options = CodecOptions {
        early_change: true,
        ..CodecOptions::default()
    };
    let indices = generate_indices(30_000, 16, 5);

    let mut early = Vec::new();
    write_image_data(&mut early, &indices, 16, options).unwrap();
    let mut standard = Vec::new();
    write_image_data(&mut standard, &indices, 16, CodecOptions::default()).unwrap();
    assert_ne!(early, standard);

    let (decoded, _) = read_image_data(&mut &early[..], options).unwrap();
    assert_eq!(decoded, indices);
}

#[test]
fn test_out_of_range_index() {
    let mut block = Vec::new();
    let err = encode_image_data(&mut block, &[0, 1, 2, 3, 4], 4).unwrap_err();
    assert!(err.is_range_error());

    // The palette rounds up to a power of two; 5 colors allow indices up to 7.
    let mut block = Vec::new();
    encode_image_data(&mut block, &[7, 6, 5], 5).unwrap();
    assert_eq!(block[0], 3);
}

#[test]
fn test_concurrent_codecs() {
    let inputs: Vec<(Vec<u8>, usize)> = (0..8)
        .map(|i| {
            let palette_size = 2 << i;
            (generate_indices(20_000, palette_size, i as u64), palette_size)
        })
        .collect();

    let serial: Vec<Vec<u8>> = inputs
        .iter()
        .map(|(indices, palette_size)| {
            let mut block = Vec::new();
            encode_image_data(&mut block, indices, *palette_size).unwrap();
            block
        })
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|(indices, palette_size)| {
                scope.spawn(move || {
                    let mut block = Vec::new();
                    encode_image_data(&mut block, indices, *palette_size).unwrap();
                    let decoded = decode_image_data(&mut &block[..]).unwrap();
                    assert_eq!(&decoded, indices);
                    block
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(&serial) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_codecs_are_send() {
    fn assert_send<T: Send + Sync>() {}
    assert_send::<LzwEncoder>();
    assert_send::<LzwDecoder>();
    assert_send::<LzwConfig>();
}
