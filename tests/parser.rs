mod tests {
    use tlc5947_composer::pattern::parse;
    use tlc5947_composer::{Error, Rgb12, Token};

    #[test]
    fn test_single_color() {
        let tokens = parse("#FFFFFF").unwrap();
        assert_eq!(
            tokens,
            [Token::Color(Rgb12::new(4095, 4095, 4095))]
        );
    }

    #[test]
    fn test_color_case_insensitive() {
        assert_eq!(parse("#ffffff").unwrap(), parse("#FFFFFF").unwrap());
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = parse("+-> @").unwrap();
        assert_eq!(
            tokens,
            [
                Token::Increment,
                Token::Decrement,
                Token::Pop,
                Token::Transparent
            ]
        );
    }

    #[test]
    fn test_sleep_and_push_arguments() {
        let tokens = parse("<5|500").unwrap();
        assert_eq!(
            tokens,
            [
                Token::Push(5),
                Token::Sleep {
                    duration: 500,
                    remaining: 0
                }
            ]
        );
    }

    #[test]
    fn test_brightness_argument_forms() {
        let tokens = parse("\x08-0.1\x081\x080.25").unwrap();
        assert_eq!(
            tokens,
            [
                Token::Brightness(-0.1),
                Token::Brightness(1.0),
                Token::Brightness(0.25)
            ]
        );
    }

    #[test]
    fn test_jump_resolves_to_matching_mark() {
        let tokens = parse("+[|1]").unwrap();
        assert_eq!(tokens[1], Token::Mark);
        assert_eq!(tokens[3], Token::JumpNonZero(1));
    }

    #[test]
    fn test_nested_jumps_resolve_by_depth() {
        let tokens = parse("[[|1]|2]").unwrap();
        // Inner pair.
        assert_eq!(tokens[0], Token::Mark);
        assert_eq!(tokens[1], Token::Mark);
        assert_eq!(tokens[3], Token::JumpNonZero(1));
        // Outer pair.
        assert_eq!(tokens[5], Token::JumpNonZero(0));
    }

    #[test]
    fn test_sibling_jumps_resolve_independently() {
        let tokens = parse("[|1][|2]").unwrap();
        assert_eq!(tokens[2], Token::JumpNonZero(0));
        assert_eq!(tokens[5], Token::JumpNonZero(3));
    }

    #[test]
    fn test_forever_stops_tokenizing() {
        // Everything past the terminator is ignored, even junk.
        let tokens = parse("#000000;???").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::Forever);
    }

    #[test]
    fn test_spaces_are_ignored() {
        assert_eq!(parse(" #000000 |5 ;").unwrap().len(), 3);
    }

    #[test]
    fn test_unbalanced_jumps() {
        assert_eq!(parse("["), Err(Error::UnbalancedJumps));
        assert_eq!(parse("]"), Err(Error::UnbalancedJumps));
        assert_eq!(parse("][").unwrap_err(), Error::UnbalancedJumps);
        assert_eq!(parse("[[]"), Err(Error::UnbalancedJumps));
    }

    #[test]
    fn test_invalid_color_form() {
        assert_eq!(parse("#12345"), Err(Error::InvalidColorFormat));
        assert_eq!(parse("#12G45A"), Err(Error::InvalidColorFormat));
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(parse("#000000x"), Err(Error::UnknownCharacter('x')));
        assert_eq!(parse("5"), Err(Error::UnknownCharacter('5')));
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(parse(""), Err(Error::ZeroLength));
        assert_eq!(parse("   "), Err(Error::ZeroLength));
    }

    #[test]
    fn test_sleep_duration_must_fit() {
        assert!(parse("|65535").is_ok());
        assert_eq!(parse("|65536"), Err(Error::InvalidNumber));
        assert_eq!(parse("|"), Err(Error::InvalidNumber));
    }

    #[test]
    fn test_push_immediate_must_fit() {
        assert!(parse("<32767").is_ok());
        assert_eq!(parse("<32768"), Err(Error::InvalidNumber));
        assert_eq!(parse("<"), Err(Error::InvalidNumber));
    }

    #[test]
    fn test_brightness_needs_digits() {
        assert_eq!(parse("\x08"), Err(Error::InvalidNumber));
        assert_eq!(parse("\x08-"), Err(Error::InvalidNumber));
        assert_eq!(parse("\x08."), Err(Error::InvalidNumber));
        assert_eq!(parse("\x081."), Err(Error::InvalidNumber));
    }

    #[test]
    fn test_errors_follow_pass_order() {
        // Balance is checked before colors, colors before the rest.
        assert_eq!(parse("[#xx"), Err(Error::UnbalancedJumps));
        assert_eq!(parse("#xxxxxxq"), Err(Error::InvalidColorFormat));
    }
}
