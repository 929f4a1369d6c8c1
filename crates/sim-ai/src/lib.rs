//! Autoplay decision policies used by the evaluation harness.
//!
//! A policy looks at the offered menu (each entry annotated with the engine's
//! own utility) and returns the index of the decision to submit. Policies
//! own whatever randomness they need; they never draw from the session RNG.

mod personas;

pub use personas::{persona, personas, Persona};

use sim_core::{Decision, Scenario, SimRng};

/// One offered decision together with the engine's menu utility for it.
#[derive(Clone, Copy, Debug)]
pub struct MenuEntry<'a> {
    pub decision: &'a Decision,
    pub utility: f64,
}

/// What a policy sees when it is asked to choose.
#[derive(Clone, Copy, Debug)]
pub struct PolicyContext<'a> {
    pub menu: &'a [MenuEntry<'a>],
    pub scenario: &'a Scenario,
}

/// Decision-selection strategy usable without a human.
pub trait DecisionPolicy {
    fn name(&self) -> &str;
    /// Index into `ctx.menu`, or `None` when nothing can be chosen.
    fn choose(&mut self, ctx: &PolicyContext<'_>) -> Option<usize>;
}

/// Always submits the highest-utility option. Ties keep menu order.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl DecisionPolicy for GreedyPolicy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose(&mut self, ctx: &PolicyContext<'_>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, entry) in ctx.menu.iter().enumerate() {
            if best.map_or(true, |(_, u)| entry.utility > u) {
                best = Some((i, entry.utility));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Probability mass above which a persona settles for its second choice.
const SECOND_CHOICE_NOISE: f64 = 0.84;

/// Persona-driven policy: ranks the menu by the persona's own metric and
/// principle weights, occasionally taking the runner-up.
#[derive(Clone, Debug)]
pub struct PersonaPolicy {
    persona: Persona,
    rng: SimRng,
}

impl PersonaPolicy {
    pub fn new(persona: Persona, rng: SimRng) -> Self {
        Self { persona, rng }
    }

    /// Policy seeded for an episode; the stream is independent of the
    /// session's own RNG.
    pub fn for_episode(persona: Persona, episode_seed: u64) -> Self {
        let seed = episode_seed.wrapping_mul(100).wrapping_add(17);
        Self::new(persona, SimRng::new(seed))
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }
}

impl DecisionPolicy for PersonaPolicy {
    fn name(&self) -> &str {
        &self.persona.id
    }

    fn choose(&mut self, ctx: &PolicyContext<'_>) -> Option<usize> {
        if ctx.menu.is_empty() {
            return None;
        }
        let mut ranked: Vec<(usize, f64)> = ctx
            .menu
            .iter()
            .enumerate()
            .map(|(i, e)| (i, self.persona.score(e.decision, ctx.scenario)))
            .collect();
        // Stable sort keeps menu order between equal scores.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let noise = self.rng.unit();
        let pick = match ranked.get(1) {
            Some(second) if noise > SECOND_CHOICE_NOISE => second,
            _ => &ranked[0],
        };
        tracing::trace!(persona = %self.persona.id, index = pick.0, noise, "persona choice");
        Some(pick.0)
    }
}
