use crate::*;
pub use random::*;

mod random;

/// Strategy for placing mines on a board described by a [`GameConfig`].
pub trait LayoutGenerator {
    /// Fails only when `config` cannot hold the requested mines.
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
