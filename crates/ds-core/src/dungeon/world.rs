//! Floor progression

use serde::{Deserialize, Serialize};
use tracing::info;

use super::generation::{GeneratedFloor, GenerationParams, generate_dungeon};
use crate::entity::IdAllocator;
use crate::error::GenerationError;
use crate::rng::GameRng;
use crate::templates::TemplateSet;

/// Generator settings plus how deep the player is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameWorld {
    pub params: GenerationParams,
    pub current_floor: i32,
}

impl GameWorld {
    /// A world that has not generated any floor yet
    pub fn new(params: GenerationParams) -> Self {
        Self {
            params,
            current_floor: 0,
        }
    }

    /// Build the next floor down. The floor counter only moves on success.
    pub fn generate_floor(
        &mut self,
        templates: &TemplateSet,
        ids: IdAllocator,
        rng: &mut GameRng,
    ) -> Result<GeneratedFloor, GenerationError> {
        let next = self.current_floor + 1;
        let floor = generate_dungeon(&self.params, next, templates, ids, rng)?;
        self.current_floor = next;
        info!(floor = next, rooms = floor.rooms.len(), "entered new floor");
        Ok(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_counter() {
        let mut world = GameWorld::new(GenerationParams::default());
        let mut rng = GameRng::new(5);
        assert_eq!(world.current_floor, 0);

        let first = world
            .generate_floor(&TemplateSet::builtin(), IdAllocator::default(), &mut rng)
            .unwrap();
        assert_eq!(world.current_floor, 1);

        world
            .generate_floor(&TemplateSet::builtin(), first.map.ids.clone(), &mut rng)
            .unwrap();
        assert_eq!(world.current_floor, 2);
    }

    #[test]
    fn test_failed_generation_keeps_floor() {
        let mut world = GameWorld::new(GenerationParams {
            map_width: 4,
            map_height: 4,
            ..GenerationParams::default()
        });
        let mut rng = GameRng::new(5);
        assert!(world
            .generate_floor(&TemplateSet::builtin(), IdAllocator::default(), &mut rng)
            .is_err());
        assert_eq!(world.current_floor, 0);
    }
}
