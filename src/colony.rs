use crate::ant::Ant;

/// A fixed-size collection of ants sharing one grid.
///
/// The colony never grows or shrinks during a simulation; ants are recycled
/// after each round trip rather than replaced.
pub struct Colony {
    ants: Vec<Ant>,
}

impl Colony {
    pub fn new(size: usize, pheromone_intensity: f64, pheromone_loss_factor: f64) -> Colony {
        Colony {
            ants: (0..size)
                .map(|_| Ant::new(pheromone_intensity, pheromone_loss_factor))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ants.is_empty()
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    pub fn ants_mut(&mut self) -> &mut [Ant] {
        &mut self.ants
    }

    /// The current position of every ant, in colony order.
    pub fn positions(&self) -> Vec<(usize, usize)> {
        self.ants.iter().map(|ant| ant.position()).collect()
    }

    /// All ants currently standing on the given position.
    pub fn ants_at(&self, position: (usize, usize)) -> Vec<&Ant> {
        self.ants
            .iter()
            .filter(|ant| ant.position() == position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_a_colony_every_ant_starts_at_the_nest() {
        let colony = Colony::new(5, 2.1, 0.05);

        assert_eq!(colony.len(), 5);
        assert_eq!(colony.positions(), vec![(0, 0); 5]);
    }

    #[test]
    fn when_creating_a_colony_every_ant_gets_a_distinct_id() {
        let colony = Colony::new(3, 2.1, 0.05);

        let ids: Vec<&str> = colony.ants().iter().map(|ant| ant.id()).collect();

        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn when_querying_ants_at_a_position_only_ants_standing_there_are_returned() {
        let colony = Colony::new(4, 2.1, 0.05);

        assert_eq!(colony.ants_at((0, 0)).len(), 4);
        assert!(colony.ants_at((1, 1)).is_empty());
    }
}
