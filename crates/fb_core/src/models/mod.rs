pub mod game;
pub mod player;
pub mod playoffs;
pub mod rotation;
pub mod team;

pub use game::{BoxScore, Game, GameResult, PlayerLine, TeamTotals};
pub use player::{Player, PlayerAttributes, Position};
pub use playoffs::{Conference, PlayoffBracket, PlayoffRound, PlayoffSeries, SeededTeam};
pub use rotation::{
    DepthChartEntry, RotationConfig, RotationViolation, GAME_MINUTES, MAX_ROTATION_SIZE,
    MIN_ROTATION_SIZE, TOTAL_ROTATION_MINUTES,
};
pub use team::{Team, MAX_ROSTER_SIZE, MIN_ROSTER_SIZE};
