use std::fmt;
use std::ops::Not;

/// A side of the board. Black always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Player {
    Black = 1,
    White = -1,
}

impl Player {
    pub const FIRST: Player = Player::Black;

    pub const fn opposite(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// `+1` for Black, `-1` for White.
    pub const fn sign(self) -> i8 {
        self as i8
    }

    pub fn from_sign(sign: i8) -> Option<Player> {
        match sign {
            1 => Some(Player::Black),
            -1 => Some(Player::White),
            _ => None,
        }
    }

    /// Cell symbol used by the board's text form.
    pub const fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }

    pub fn from_symbol(c: char) -> Option<Player> {
        match c.to_ascii_uppercase() {
            'B' | 'X' => Some(Player::Black),
            'W' | 'O' => Some(Player::White),
            _ => None,
        }
    }
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        self.opposite()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::Black => "Black",
            Player::White => "White",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Player::Black.opposite(), Player::White);
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(!!Player::FIRST, Player::FIRST);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Player::from_symbol('b'), Some(Player::Black));
        assert_eq!(Player::from_symbol('O'), Some(Player::White));
        assert_eq!(Player::from_symbol('.'), None);
        assert_eq!(Player::White.symbol(), 'W');
    }

    #[test]
    fn test_sign() {
        assert_eq!(Player::from_sign(Player::White.sign()), Some(Player::White));
        assert_eq!(Player::Black.sign(), 1);
        assert_eq!(Player::from_sign(0), None);
    }
}
