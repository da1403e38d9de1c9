use super::{ActionOutcome, TurnContext, impossible};
use crate::dungeon::Tile;
use crate::entity::EntityId;
use crate::error::ActionError;

/// Descend when standing on the down staircase. Building the next floor is
/// left to the turn loop.
pub(super) fn take_stairs(
    ctx: &mut TurnContext,
    actor: EntityId,
) -> Result<ActionOutcome, ActionError> {
    let (x, y) = ctx.living_actor(actor)?.pos();
    if (x, y) == ctx.map.downstairs && ctx.map.tile(x, y) == Some(Tile::DownStairs) {
        Ok(ActionOutcome::Descend)
    } else {
        Err(impossible("You can't descend into matter."))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::super::{Action, perform};
    use super::*;

    #[test]
    fn test_stairs() {
        let mut fx = Fixture::new();
        let player = fx.player;
        fx.map.set_tile(5, 5, Tile::DownStairs);
        fx.map.downstairs = (5, 5);

        assert!(matches!(
            perform(Action::TakeStairs, player, &mut fx.ctx()),
            Err(ActionError::Impossible(_))
        ));
        fx.map.place(player, 5, 5);
        assert_eq!(perform(Action::TakeStairs, player, &mut fx.ctx()), Ok(ActionOutcome::Descend));
    }
}
