//! Square conversions for algebraic coordinates such as `e4`.

use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Square::new((file - b'a') as i8, (rank - b'1') as i8)
        .ok_or_else(|| format!("Invalid algebraic square: {square}"))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Parse a coordinate move such as `e2e4` into its two squares.
pub fn parse_coordinate_move(text: &str) -> Result<(Square, Square), String> {
    let text = text.trim();
    if text.len() != 4 || !text.is_ascii() {
        return Err(format!("Invalid coordinate move: {text}"));
    }
    Ok((algebraic_to_square(&text[..2])?, algebraic_to_square(&text[2..])?))
}
