/// Asserts that the agent with the given ID has more than the given energy.
#[macro_export]
macro_rules! assert_energy_above {
    ($world:expr, $id:expr, $min_energy:expr) => {
        let agent = $world.agent($id).expect("Agent not found in world");
        assert!(
            agent.energy > $min_energy,
            "Agent {} energy {} is not above {}",
            $id,
            agent.energy,
            $min_energy
        );
    };
}

/// Asserts that the agent with the given ID is no longer alive in the world.
#[macro_export]
macro_rules! assert_agent_dead {
    ($world:expr, $id:expr) => {
        let alive = $world.agent($id).is_some_and(|a| a.alive);
        assert!(!alive, "Agent {} should be dead but was found alive", $id);
    };
}

/// Asserts the live head-count of one species.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $species:expr, $count:expr) => {
        assert_eq!(
            $world.population().count($species),
            $count,
            "Population count mismatch for {:?}",
            $species
        );
    };
}
