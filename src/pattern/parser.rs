//! Pattern source parsing.
//!
//! Parsing makes three validation passes before a single token is
//! allocated: bracket balance, color form, and a token count that also
//! vets every numeric argument. The fourth pass fills an exact-size
//! program and resolves each `]` to its matching `[` by scanning the
//! tokens already emitted.

use alloc::vec::Vec;

use super::Token;
use crate::color::{parse_hex, Rgb12};
use crate::error::{Error, Result};

/// Brightness tokens are introduced by a literal backspace.
const BRIGHTNESS_MARKER: u8 = 0x08;

/// Compile a pattern source string into its token program.
///
/// The grammar, one token per spelling:
///
/// ```text
/// #RRGGBB   set color          |N   hold N ticks       <N   push N
/// \bF       adjust brightness  [    mark               >    pop
/// @         toggle visibility  ]    jump back if top   +/-  adjust top
/// ;         hold forever, ignore the rest
/// ```
///
/// Spaces are ignored. Holds must fit `u16`, immediates must fit `i16`.
pub fn parse(source: &str) -> Result<Vec<Token>> {
    check_balance(source)?;
    check_colors(source)?;
    let count = count_tokens(source)?;
    tokenize(source, count)
}

/// Every prefix must have at least as many `[` as `]`, and the whole
/// string equally many.
fn check_balance(source: &str) -> Result<()> {
    let mut open = 0u32;
    for byte in source.bytes() {
        match byte {
            b'[' => open += 1,
            b']' => match open.checked_sub(1) {
                Some(rest) => open = rest,
                None => return Err(Error::UnbalancedJumps),
            },
            _ => {}
        }
    }
    if open != 0 {
        return Err(Error::UnbalancedJumps);
    }
    Ok(())
}

/// Every `#` must be followed by six hex digits.
fn check_colors(source: &str) -> Result<()> {
    let bytes = source.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if *byte != b'#' {
            continue;
        }
        let group = bytes.get(index + 1..index + 7).ok_or(Error::InvalidColorFormat)?;
        if !group.iter().all(u8::is_ascii_hexdigit) {
            return Err(Error::InvalidColorFormat);
        }
    }
    Ok(())
}

/// Count tokens, consuming each token's argument, stopping at `;`.
fn count_tokens(source: &str) -> Result<usize> {
    let bytes = source.as_bytes();
    let mut count = 0usize;
    let mut i = 0;
    'scan: while i < bytes.len() {
        let byte = bytes[i];
        i += 1;
        match byte {
            b'#' => {
                count += 1;
                i += 6;
            }
            BRIGHTNESS_MARKER => {
                count += 1;
                i = scan_decimal(bytes, i)?;
            }
            b'|' | b'<' => {
                count += 1;
                let end = scan_digits(bytes, i);
                if end == i {
                    return Err(Error::InvalidNumber);
                }
                i = end;
            }
            b'[' | b']' | b'+' | b'-' | b'>' | b'@' => count += 1,
            b';' => {
                count += 1;
                break 'scan;
            }
            b' ' => {}
            other => return Err(Error::UnknownCharacter(char::from(other))),
        }
    }
    if count == 0 {
        return Err(Error::ZeroLength);
    }
    if count > usize::from(u16::MAX) {
        // The program counter is sixteen bits wide.
        return Err(Error::AllocationFailure);
    }
    Ok(count)
}

/// Fill an exact-size program; token count and arguments were vetted by
/// the earlier passes.
fn tokenize(source: &str, count: usize) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens: Vec<Token> = Vec::new();
    tokens
        .try_reserve_exact(count)
        .map_err(|_| Error::AllocationFailure)?;
    let mut i = 0;
    while i < bytes.len() && tokens.len() < count {
        match bytes[i] {
            b'#' => {
                let color = parse_hex(&source[i..i + 7])?;
                tokens.push(Token::Color(Rgb12::from_rgb8(color)));
                i += 7;
            }
            BRIGHTNESS_MARKER => {
                let end = scan_decimal(bytes, i + 1)?;
                let delta: f32 = source[i + 1..end].parse().map_err(|_| Error::InvalidNumber)?;
                tokens.push(Token::Brightness(delta));
                i = end;
            }
            b'|' => {
                let end = scan_digits(bytes, i + 1);
                let duration: u16 = source[i + 1..end].parse().map_err(|_| Error::InvalidNumber)?;
                tokens.push(Token::Sleep {
                    duration: u32::from(duration),
                    remaining: 0,
                });
                i = end;
            }
            b'<' => {
                let end = scan_digits(bytes, i + 1);
                let value: i16 = source[i + 1..end].parse().map_err(|_| Error::InvalidNumber)?;
                tokens.push(Token::Push(value));
                i = end;
            }
            b'>' => {
                tokens.push(Token::Pop);
                i += 1;
            }
            b'[' => {
                tokens.push(Token::Mark);
                i += 1;
            }
            b']' => {
                let target = resolve_mark(&tokens);
                tokens.push(Token::JumpNonZero(target));
                i += 1;
            }
            b'+' => {
                tokens.push(Token::Increment);
                i += 1;
            }
            b'-' => {
                tokens.push(Token::Decrement);
                i += 1;
            }
            b'@' => {
                tokens.push(Token::Transparent);
                i += 1;
            }
            b';' => {
                tokens.push(Token::Forever);
                break;
            }
            b' ' => i += 1,
            other => return Err(Error::UnknownCharacter(char::from(other))),
        }
    }
    Ok(tokens)
}

/// Find the mark a `]` jumps to: nearest preceding `[` at matching
/// nesting depth. The balance pass guarantees it exists.
fn resolve_mark(tokens: &[Token]) -> u16 {
    let mut depth = 1u32;
    for (index, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::JumpNonZero(_) => depth += 1,
            Token::Mark => {
                depth -= 1;
                if depth == 0 {
                    return index as u16;
                }
            }
            _ => {}
        }
    }
    0
}

/// Scan past `-? DIGIT+ (. DIGIT+)?`, requiring at least one integer
/// digit.
fn scan_decimal(bytes: &[u8], start: usize) -> Result<usize> {
    let mut i = start;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    let integer_end = scan_digits(bytes, i);
    if integer_end == i {
        return Err(Error::InvalidNumber);
    }
    i = integer_end;
    if bytes.get(i) == Some(&b'.') {
        let fraction_end = scan_digits(bytes, i + 1);
        if fraction_end == i + 1 {
            return Err(Error::InvalidNumber);
        }
        i = fraction_end;
    }
    Ok(i)
}

fn scan_digits(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}
