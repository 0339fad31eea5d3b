mod tests {
    use tlc5947_composer::{Frame, Rgb12, FRAME_SIZE, LED_COUNT};

    /// Deterministic 12-bit channel values for exercising the packer.
    fn scrambled(seed: u32) -> impl FnMut() -> u16 {
        let mut state = seed.wrapping_mul(2891336453).wrapping_add(1);
        move || {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            (state >> 16) as u16 & 0x0FFF
        }
    }

    #[test]
    fn test_new_frame_is_dark() {
        let frame = Frame::new();
        assert_eq!(frame.as_bytes(), &[0u8; FRAME_SIZE]);
        for led in 0..LED_COUNT {
            assert_eq!(frame.get(led), Rgb12::BLACK);
        }
    }

    #[test]
    fn test_pack_unpack_is_identity() {
        for seed in 0..32 {
            let mut next = scrambled(seed);
            let colors: [Rgb12; LED_COUNT] =
                core::array::from_fn(|_| Rgb12::new(next(), next(), next()));

            let mut frame = Frame::new();
            for (led, color) in colors.iter().enumerate() {
                frame.set(led, *color);
            }
            for (led, color) in colors.iter().enumerate() {
                assert_eq!(frame.get(led), *color, "seed {} led {}", seed, led);
            }
        }
    }

    #[test]
    fn test_even_led_layout() {
        let mut frame = Frame::new();
        frame.set(0, Rgb12::new(0xABC, 0xDEF, 0x123));
        let bytes = frame.as_bytes();
        // Blue first: B[11:4], then B[3:0] packed with G[11:8].
        assert_eq!(bytes[0], 0x12);
        assert_eq!(bytes[1], 0x3D);
        assert_eq!(bytes[2], 0xEF);
        assert_eq!(bytes[3], 0xAB);
        assert_eq!(bytes[4], 0xC0);
    }

    #[test]
    fn test_odd_led_layout() {
        let mut frame = Frame::new();
        frame.set(1, Rgb12::new(0xABC, 0xDEF, 0x123));
        let bytes = frame.as_bytes();
        // Starts on the low nibble of the byte shared with led 0.
        assert_eq!(bytes[4], 0x01);
        assert_eq!(bytes[5], 0x23);
        assert_eq!(bytes[6], 0xDE);
        assert_eq!(bytes[7], 0xFA);
        assert_eq!(bytes[8], 0xBC);
    }

    #[test]
    fn test_neighbors_share_a_byte_without_clobbering() {
        let mut frame = Frame::new();
        frame.set(0, Rgb12::new(0xFFF, 0xFFF, 0xFFF));
        frame.set(1, Rgb12::new(0xFFF, 0xFFF, 0xFFF));
        assert_eq!(frame.as_bytes()[4], 0xFF);

        // Rewriting either side must leave the other side's nibble.
        frame.set(0, Rgb12::BLACK);
        assert_eq!(frame.as_bytes()[4], 0x0F);
        assert_eq!(frame.get(1), Rgb12::new(0xFFF, 0xFFF, 0xFFF));

        frame.set(0, Rgb12::new(0xFFF, 0xFFF, 0xFFF));
        frame.set(1, Rgb12::BLACK);
        assert_eq!(frame.as_bytes()[4], 0xF0);
        assert_eq!(frame.get(0), Rgb12::new(0xFFF, 0xFFF, 0xFFF));
    }

    #[test]
    fn test_all_leds_cover_the_full_frame() {
        let mut frame = Frame::new();
        for led in 0..LED_COUNT {
            frame.set(led, Rgb12::new(0xFFF, 0xFFF, 0xFFF));
        }
        assert_eq!(frame.as_bytes(), &[0xFF; FRAME_SIZE]);
    }
}
