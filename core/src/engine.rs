use alloc::collections::VecDeque;
use core::fmt;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Active,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// A single game: the mine layout and everything the player has done to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        log::debug!(
            "New {}x{} board with {} mines",
            size,
            size,
            mine_layout.mine_count()
        );
        Self {
            mine_layout,
            cells: Array2::default((size, size).to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn generate<G: LayoutGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    /// Validates `dim_size`/`num_bombs` and places the mines with `rng`.
    pub fn initialize<R: Rng + ?Sized>(
        dim_size: Coord,
        num_bombs: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        let config = GameConfig::new(dim_size, num_bombs)?;
        Self::generate(config, RejectionSampler::new(rng))
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate(config, SeededGenerator::new(seed))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Every safe cell is revealed, flags on the mines are irrelevant.
    pub fn is_won(&self) -> bool {
        self.revealed_count == self.mine_layout.safe_cell_count()
    }

    pub fn is_lost(&self) -> bool {
        self.triggered_mine.is_some()
    }

    pub fn size(&self) -> Coord {
        self.mine_layout.size()
    }

    pub fn game_config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Toggles a flag between hidden and flagged.
    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        let outcome = match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                MarkOutcome::Flagged
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Unflagged
            }
            Revealed => return Err(GameError::AlreadyRevealed),
        };
        log::debug!("Flag toggled at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Reveals a cell, flood-filling from it when no mine borders it.
    ///
    /// A flagged cell is only revealed with `force`, which removes the flag first; otherwise nothing changes and
    /// [`RevealOutcome::Declined`] is returned.
    pub fn reveal(&mut self, coords: Coord2, force: bool) -> Result<RevealOutcome> {
        use CellState::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_not_finished()?;

        match self.cells[coords.to_nd_index()] {
            Revealed => Err(GameError::AlreadyRevealed),
            Flagged if !force => {
                log::debug!("Declined reveal of flagged cell at {:?}", coords);
                Ok(RevealOutcome::Declined)
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                log::debug!("Forced reveal removed flag at {:?}", coords);
                Ok(self.reveal_hidden_cell(coords))
            }
            Hidden => Ok(self.reveal_hidden_cell(coords)),
        }
    }

    fn reveal_hidden_cell(&mut self, coords: Coord2) -> RevealOutcome {
        self.cells[coords.to_nd_index()] = CellState::Revealed;

        let Some(adjacent_mines) = self.mine_layout.adjacent_mine_count(coords) else {
            log::debug!("Hit mine at {:?}", coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        };

        self.revealed_count += 1;
        log::debug!("Revealed cell at {:?}, mine count: {}", coords, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.is_won() {
            self.end_game(true);
        } else {
            self.mark_started();
        }
        RevealOutcome::Safe
    }

    /// Reveals the zero region around an already revealed zero cell, never entering flagged cells.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.hidden_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            // queued more than once, or flagged
            if self.cells[visit_coords.to_nd_index()] != CellState::Hidden {
                continue;
            }

            // every neighbor of a zero cell is safe
            let visit_adjacent_mines = self
                .mine_layout
                .adjacent_mine_count(visit_coords)
                .unwrap_or_default();
            self.cells[visit_coords.to_nd_index()] = CellState::Revealed;
            self.revealed_count += 1;
            log::trace!(
                "Flood revealed cell at {:?}, mine count: {}",
                visit_coords,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(move |&pos| self.cells[pos.to_nd_index()] == CellState::Hidden)
    }

    /// Projects the board onto what a player may see.
    pub fn view(&self) -> Array2<CellView> {
        Array2::from_shape_fn(self.cells.dim(), |index| {
            self.view_at(Coord2::from_nd_index(index))
        })
    }

    fn view_at(&self, coords: Coord2) -> CellView {
        match self.cells[coords.to_nd_index()] {
            CellState::Hidden => CellView::Covered,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed => match self.mine_layout.adjacent_mine_count(coords) {
                None => CellView::Mine,
                Some(count) => CellView::Count(count),
            },
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = GameState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("Game ended: {:?}", self.state);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// One row per line, cells separated by a space.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.view().rows() {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn board(size: Coord, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn cells_in(board: &Board, state: CellState) -> CellCount {
        board.cells.iter().filter(|&&cell| cell == state).count() as CellCount
    }

    #[test]
    fn new_board_is_all_hidden() {
        let board = board(4, &[(0, 0), (3, 3)]);

        assert_eq!(cells_in(&board, CellState::Hidden), 16);
        assert_eq!(board.state(), GameState::Ready);
        assert!(!board.is_won());
        assert!(!board.is_lost());
        assert_eq!(board.mines_left(), 2);
    }

    #[test]
    fn initialize_places_mines_from_injected_rng() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(11);
        let board = Board::initialize(9, 12, &mut rng).unwrap();

        assert_eq!(board.total_mines(), 12);
        assert_eq!(board.mine_layout().iter_mines().count(), 12);
        assert_eq!(cells_in(&board, CellState::Hidden), 81);
    }

    #[test]
    fn initialize_rejects_full_board() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            Board::initialize(5, 25, &mut rng),
            Err(GameError::Config(ConfigError::TooManyMines { .. }))
        ));
        assert_eq!(
            Board::initialize(0, 0, &mut rng),
            Err(GameError::Config(ConfigError::EmptyBoard))
        );
    }

    #[test]
    fn seeded_boards_are_reproducible() {
        let config = GameConfig::new(12, 20).unwrap();
        let first = Board::with_seed(config, 99).unwrap();
        let second = Board::with_seed(config, 99).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.game_config(), config);
    }

    #[test]
    fn reveal_hits_mine_and_ends_game() {
        let mut board = board(2, &[(0, 0)]);

        let outcome = board.reveal((0, 0), false).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(board.state(), GameState::Lost);
        assert!(board.is_lost());
        assert!(!board.is_won());
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        assert_eq!(board.cell_at((0, 0)), Ok(CellState::Revealed));
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.reveal((1, 1), false), Err(GameError::AlreadyEnded));
        assert_eq!(board.flag((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn reveal_numbered_cell_does_not_spread() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.reveal((1, 1), false), Ok(RevealOutcome::Safe));
        assert_eq!(board.state(), GameState::Active);
        assert_eq!(cells_in(&board, CellState::Revealed), 1);
    }

    #[test]
    fn zero_region_from_far_corner_opens_every_safe_cell() {
        // (0, 2), (1, 2), (2, 0), (2, 1) and (2, 2) are all zeros here
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.reveal((2, 2), false), Ok(RevealOutcome::Safe));

        assert_eq!(board.cell_at((0, 0)), Ok(CellState::Hidden));
        assert_eq!(board.revealed_count(), 8);
        assert!(board.is_won());
        assert_eq!(board.state(), GameState::Won);
        assert_eq!(board.reveal((0, 0), false), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn flood_fill_stops_at_numbered_cells() {
        let mut board = board(3, &[(0, 0), (0, 2)]);

        assert_eq!(board.reveal((2, 0), false), Ok(RevealOutcome::Safe));

        for col in 0..3 {
            assert_eq!(board.cell_at((1, col)), Ok(CellState::Revealed));
            assert_eq!(board.cell_at((2, col)), Ok(CellState::Revealed));
        }
        // safe, but only borders numbered cells
        assert_eq!(board.cell_at((0, 1)), Ok(CellState::Hidden));
        assert_eq!(board.revealed_count(), 6);
        assert!(!board.is_won());
    }

    #[test]
    fn flood_fill_never_crosses_flags() {
        let mut board = board(3, &[(0, 0)]);
        board.flag((1, 2)).unwrap();
        board.flag((2, 1)).unwrap();

        assert_eq!(board.reveal((2, 2), false), Ok(RevealOutcome::Safe));

        assert_eq!(board.cell_at((2, 2)), Ok(CellState::Revealed));
        assert_eq!(board.cell_at((1, 1)), Ok(CellState::Revealed));
        assert_eq!(board.cell_at((1, 2)), Ok(CellState::Flagged));
        assert_eq!(board.cell_at((2, 1)), Ok(CellState::Flagged));
        for coords in [(0, 1), (1, 0), (0, 2), (2, 0)] {
            assert_eq!(board.cell_at(coords), Ok(CellState::Hidden), "{:?}", coords);
        }
        assert_eq!(board.revealed_count(), 2);
        assert_eq!(board.flagged_count(), 2);
    }

    #[test]
    fn flood_fill_handles_large_open_board() {
        let mut board = board(Coord::MAX, &[(0, 0)]);

        assert_eq!(
            board.reveal((Coord::MAX - 1, Coord::MAX - 1), false),
            Ok(RevealOutcome::Safe)
        );
        assert!(board.is_won());
        assert_eq!(board.revealed_count(), board.mine_layout().safe_cell_count());
    }

    #[test]
    fn flag_twice_restores_hidden() {
        let mut board = board(3, &[(2, 2)]);
        let before = board.clone();

        assert_eq!(board.flag((0, 1)), Ok(MarkOutcome::Flagged));
        assert_eq!(board.cell_at((0, 1)), Ok(CellState::Flagged));
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.flag((0, 1)), Ok(MarkOutcome::Unflagged));
        assert_eq!(board, before);
    }

    #[test]
    fn flag_on_revealed_cell_is_rejected() {
        let mut board = board(3, &[(0, 0)]);
        board.reveal((1, 1), false).unwrap();
        let before = board.clone();

        assert_eq!(board.flag((1, 1)), Err(GameError::AlreadyRevealed));
        assert_eq!(board.reveal((1, 1), false), Err(GameError::AlreadyRevealed));
        assert_eq!(board.reveal((1, 1), true), Err(GameError::AlreadyRevealed));
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut board = board(3, &[(0, 0)]);

        assert_eq!(board.reveal((3, 0), false), Err(GameError::OutOfBounds));
        assert_eq!(board.reveal((0, 3), true), Err(GameError::OutOfBounds));
        assert_eq!(board.flag((5, 5)), Err(GameError::OutOfBounds));
        assert_eq!(board.cell_at((3, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn reveal_of_flagged_cell_needs_force() {
        let mut board = board(3, &[(2, 2)]);
        board.flag((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.reveal((0, 0), false), Ok(RevealOutcome::Declined));
        assert_eq!(board, before);
        assert_eq!(board.cell_at((0, 0)), Ok(CellState::Flagged));

        assert_eq!(board.reveal((0, 0), true), Ok(RevealOutcome::Safe));
        assert_eq!(board.cell_at((0, 0)), Ok(CellState::Revealed));
        assert_eq!(board.flagged_count(), 0);
        // (0, 0) is a zero, so the fill continued from it
        assert!(board.is_won());
    }

    #[test]
    fn forced_reveal_of_flagged_mine_loses() {
        let mut board = board(3, &[(0, 0)]);
        board.flag((0, 0)).unwrap();

        assert_eq!(board.reveal((0, 0), false), Ok(RevealOutcome::Declined));
        assert!(!board.is_finished());

        assert_eq!(board.reveal((0, 0), true), Ok(RevealOutcome::HitMine));
        assert_eq!(board.cell_at((0, 0)), Ok(CellState::Revealed));
        assert_eq!(board.view()[[0, 0]], CellView::Mine);
        assert!(board.is_lost());
    }

    #[test]
    fn won_regardless_of_flags_on_mines() {
        let mut board = board(2, &[(0, 0)]);

        assert_eq!(board.reveal((0, 1), false), Ok(RevealOutcome::Safe));
        assert_eq!(board.reveal((1, 0), false), Ok(RevealOutcome::Safe));
        assert!(!board.is_won());
        assert_eq!(board.reveal((1, 1), false), Ok(RevealOutcome::Safe));

        assert!(board.is_won());
        assert_eq!(board.cell_at((0, 0)), Ok(CellState::Hidden));
        assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn board_without_mines_is_won_by_first_reveal() {
        let mut board = board(1, &[]);
        assert_eq!(board.reveal((0, 0), false), Ok(RevealOutcome::Safe));
        assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn view_projects_every_cell_state() {
        let mut board = board(3, &[(0, 0), (0, 2)]);
        board.flag((0, 0)).unwrap();
        board.reveal((0, 1), false).unwrap();
        board.reveal((1, 1), false).unwrap();

        let view = board.view();
        assert_eq!(view[[0, 0]], CellView::Flagged);
        assert_eq!(view[[0, 1]], CellView::Count(2));
        assert_eq!(view[[1, 1]], CellView::Count(2));
        assert_eq!(view[[2, 2]], CellView::Covered);
    }

    #[test]
    fn display_renders_symbol_grid() {
        let mut board = board(3, &[(0, 0), (0, 2)]);
        board.flag((0, 2)).unwrap();
        board.reveal((2, 0), false).unwrap();
        board.reveal((0, 0), false).unwrap();

        assert_eq!(board.to_string(), "* - F\n1 2 1\n0 0 0\n");
    }

    #[test]
    fn snapshot_survives_serialization() {
        let mut board = board(4, &[(0, 0), (3, 3)]);
        board.flag((0, 0)).unwrap();
        board.reveal((3, 0), false).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board);
        assert_eq!(restored.to_string(), board.to_string());
    }
}
