use crate::board::Board;
use crate::r#move::Move;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_compact_string())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Move::Place { col, row } => serializer.serialize_str(&format!("{},{}", col, row)),
            Move::Pass => serializer.serialize_str("pass"),
        }
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        if s == "pass" {
            return Ok(Move::pass());
        }

        let (col, row) = s
            .split_once(',')
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid move format: {}", s)))?;

        let col: u8 = col
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid column: {}", e)))?;
        let row: u8 = row
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid row: {}", e)))?;

        if col >= 8 || row >= 8 {
            return Err(serde::de::Error::custom(format!(
                "Move off the board: {},{}",
                col, row
            )));
        }

        Ok(Move::place(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{EvalStrategy, EvalWeights};
    use crate::player::Player;
    use crate::search::{DepthPolicy, SearchConfig};

    #[test]
    fn test_board_serde_initial() {
        let board = Board::initial();

        let json = serde_json::to_string(&board).unwrap();
        let expected = format!("\"{}WB......BW{}\"", ".".repeat(27), ".".repeat(27));
        assert_eq!(json, expected);

        let board2: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board2, board);
    }

    #[test]
    fn test_board_serde_rejects_garbage() {
        let result: Result<Board, _> = serde_json::from_str(r#""BW""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_serde_place() {
        let move_ = Move::place(3, 4);

        let json = serde_json::to_string(&move_).unwrap();
        assert_eq!(json, r#""3,4""#);

        let move2: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(move2, move_);
    }

    #[test]
    fn test_move_serde_pass() {
        let json = serde_json::to_string(&Move::pass()).unwrap();
        assert_eq!(json, r#""pass""#);

        let move2: Move = serde_json::from_str(&json).unwrap();
        assert!(move2.is_pass());
    }

    #[test]
    fn test_move_serde_off_board() {
        let result: Result<Move, _> = serde_json::from_str(r#""8,0""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde() {
        let config = SearchConfig::new(4)
            .with_strategy(EvalStrategy::Material)
            .with_weights(EvalWeights::new(1.0, 2.0, 3.0))
            .with_depth_policy(DepthPolicy::PerPly);

        let json = serde_json::to_string(&config).unwrap();
        let config2: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config2, config);
    }

    #[test]
    fn test_bincode_board() {
        let board = Board::initial()
            .apply_move(Player::Black, crate::position::Position::new(2, 3).to_bitboard())
            .unwrap();

        let encoded = bincode::serialize(&board).unwrap();
        let board2: Board = bincode::deserialize(&encoded).unwrap();

        assert_eq!(board2, board);
    }

    #[test]
    fn test_bincode_move() {
        let move_ = Move::place(5, 6);

        let encoded = bincode::serialize(&move_).unwrap();
        let move2: Move = bincode::deserialize(&encoded).unwrap();

        assert_eq!(move2, move_);
    }
}
