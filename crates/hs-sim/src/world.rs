//! `SimulationWorld` — maps, participants, and the step loop.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use hs_core::{NodeId, ParticipantId, ParticipantRng, SimRng, Step};
use hs_graph::{DijkstraRouter, GraphError, Router, SimulationGraph, load_map};

use crate::{
    Hop, ParticipantSettings, ParticipantStatus, ParticipantStore, SimError, SimObserver,
    SimResult, SimulationData, SimulationParameters, SimulationSettings,
};

// ── SimulationMap ─────────────────────────────────────────────────────────────

/// A named, loaded graph.
pub struct SimulationMap {
    pub name:  String,
    /// File the graph was loaded from; `None` for graphs inserted in memory.
    pub path:  Option<PathBuf>,
    pub graph: SimulationGraph,
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Outcome of [`SimulationWorld::run_simulation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps:      u64,
    pub hops:       usize,
    pub arrived:    usize,
    pub stranded:   usize,
    /// Participants still moving when `max_steps` ran out.
    pub unfinished: usize,
}

// ── SimulationWorld ───────────────────────────────────────────────────────────

/// Owns every loaded map and the participants moving on the current one.
///
/// Participant positions are `NodeId`s of the current map, so selecting a
/// different map drops all participants.
pub struct SimulationWorld<R: Router = DijkstraRouter> {
    parameters:       SimulationParameters,
    seed:             u64,
    rng:              SimRng,
    router:           R,
    maps:             BTreeMap<String, SimulationMap>,
    current_map:      Option<String>,
    participants:     ParticipantStore,
    /// Per-participant RNGs, indexed by `ParticipantId`.
    rngs:             Vec<ParticipantRng>,
    /// Remaining hops each node of the current map can absorb.
    remaining_budget: Vec<u32>,
}

impl<R: Router> SimulationWorld<R> {
    pub fn new(parameters: SimulationParameters, seed: u64, router: R) -> Self {
        Self {
            parameters,
            seed,
            rng: SimRng::new(seed),
            router,
            maps: BTreeMap::new(),
            current_map: None,
            participants: ParticipantStore::new(),
            rngs: Vec::new(),
            remaining_budget: Vec::new(),
        }
    }

    /// Build a ready-to-run world from validated settings.
    ///
    /// Relative map paths resolve against `base_dir` (normally the settings
    /// file's directory).
    pub fn from_settings(settings: &SimulationSettings, base_dir: &Path, router: R) -> SimResult<Self> {
        settings.validate()?;
        let mut world = Self::new(settings.parameters.clone(), settings.seed, router);
        for (name, path) in &settings.maps {
            world.add_map(name, &base_dir.join(path))?;
        }
        let current = settings.current_map_name().ok_or(SimError::NoCurrentMap)?;
        world.set_current_map(current)?;
        world.initialize_participants(&settings.participants)?;
        Ok(world)
    }

    // ── Maps ──────────────────────────────────────────────────────────────

    /// Load a map file under `name`, replacing any map of the same name.
    pub fn add_map(&mut self, name: &str, path: &Path) -> SimResult<()> {
        let mut rng = self.rng.child(self.maps.len() as u64);
        let graph = load_map(path, &mut rng)?;
        info!(map = name, nodes = graph.node_count(), edges = graph.edge_count(), "loaded map");
        self.replace_map(SimulationMap {
            name:  name.to_owned(),
            path:  Some(path.to_path_buf()),
            graph,
        });
        Ok(())
    }

    /// Register an in-memory graph under `name`.
    pub fn insert_map(&mut self, name: &str, graph: SimulationGraph) {
        self.replace_map(SimulationMap { name: name.to_owned(), path: None, graph });
    }

    fn replace_map(&mut self, map: SimulationMap) {
        let name = map.name.clone();
        self.maps.insert(name.clone(), map);
        if self.current_map.as_deref() == Some(name.as_str()) {
            // Stale NodeIds otherwise.
            self.select(name);
        }
    }

    pub fn set_current_map(&mut self, name: &str) -> SimResult<()> {
        if !self.maps.contains_key(name) {
            return Err(SimError::UnknownMap(name.to_owned()));
        }
        self.select(name.to_owned());
        Ok(())
    }

    fn select(&mut self, name: String) {
        if !self.participants.is_empty() {
            warn!(map = %name, dropped = self.participants.len(), "switching map drops participants");
        }
        self.participants = ParticipantStore::new();
        self.rngs.clear();
        self.remaining_budget = self.maps[&name].graph.node_budget.clone();
        self.current_map = Some(name);
    }

    pub fn map_names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn current_map_name(&self) -> Option<&str> {
        self.current_map.as_deref()
    }

    pub fn current_graph(&self) -> Option<&SimulationGraph> {
        self.current_map.as_ref().map(|name| &self.maps[name].graph)
    }

    fn current_map(&self) -> SimResult<&SimulationMap> {
        self.current_map
            .as_ref()
            .map(|name| &self.maps[name])
            .ok_or(SimError::NoCurrentMap)
    }

    pub fn remaining_budget(&self) -> &[u32] {
        &self.remaining_budget
    }

    // ── Participants ──────────────────────────────────────────────────────

    pub fn participants(&self) -> &ParticipantStore {
        &self.participants
    }

    /// Place explicit participants, then `random_count` random ones, then
    /// apply the trace list.
    pub fn initialize_participants(&mut self, settings: &ParticipantSettings) -> SimResult<()> {
        for spec in &settings.explicit {
            let map = self.current_map()?;
            let lookup = |key: &str| {
                map.graph.node(key).ok_or_else(|| SimError::UnknownNode {
                    map: map.name.clone(),
                    key: key.to_owned(),
                })
            };
            let start = lookup(&spec.start)?;
            let destination = lookup(&spec.destination)?;
            self.add_participant(&spec.name, start, destination)?;
        }
        self.randomize_participants(settings.random_count)?;
        for name in &settings.trace {
            self.trace_participant(name)?;
        }
        Ok(())
    }

    /// Add `n` participants named `participant-<id>` with uniformly random
    /// start and destination nodes.
    pub fn randomize_participants(&mut self, n: usize) -> SimResult<()> {
        if n == 0 {
            return Ok(());
        }
        let mut rng = self.rng.child(self.participants.len() as u64);
        for _ in 0..n {
            let graph = &self.current_map()?.graph;
            let (Some(start), Some(destination)) = (graph.random_node(&mut rng), graph.random_node(&mut rng))
            else {
                return Err(SimError::Config("cannot place random participants on an empty map".into()));
            };
            let name = format!("participant-{}", self.participants.len());
            self.add_participant(&name, start, destination)?;
        }
        Ok(())
    }

    fn add_participant(
        &mut self,
        name:        &str,
        start:       NodeId,
        destination: NodeId,
    ) -> SimResult<ParticipantId> {
        let id = self.participants.add(name, start, destination)?;
        self.rngs.push(ParticipantRng::new(self.seed, id));
        Ok(id)
    }

    pub fn trace_participant(&mut self, name: &str) -> SimResult<()> {
        self.participants.set_traced(name, true)
    }

    pub fn untrace_participant(&mut self, name: &str) -> SimResult<()> {
        self.participants.set_traced(name, false)
    }

    // ── Step loop ─────────────────────────────────────────────────────────

    /// Run until `max_steps` or, with `stop_when_idle`, until nobody can move.
    ///
    /// `data` is cleared first; every participant is registered so that it
    /// reports a hop count even if it never moves.
    pub fn run_simulation<O: SimObserver>(
        &mut self,
        data:     &mut SimulationData,
        observer: &mut O,
    ) -> SimResult<RunSummary> {
        self.current_map()?;
        data.clear();
        for state in &self.participants.states {
            data.register(&state.name);
        }

        while data.current_step().0 < self.parameters.max_steps {
            if self.parameters.stop_when_idle && !self.participants.any_live() {
                break;
            }
            self.step(data, observer)?;
        }

        let final_step = data.current_step();
        observer.on_sim_end(final_step);

        let summary = RunSummary {
            steps:      final_step.0,
            hops:       data.hops(),
            arrived:    self.participants.count(ParticipantStatus::Arrived),
            stranded:   self.participants.count(ParticipantStatus::Stranded),
            unfinished: self.participants.states.iter().filter(|s| s.is_live()).count(),
        };
        info!(
            steps = summary.steps,
            hops = summary.hops,
            arrived = summary.arrived,
            stranded = summary.stranded,
            "simulation finished"
        );
        Ok(summary)
    }

    /// Process a single step.  Returns the number of participants in transit
    /// afterwards.
    pub fn step<O: SimObserver>(&mut self, data: &mut SimulationData, observer: &mut O) -> SimResult<usize> {
        let now = data.current_step();
        observer.on_step_start(now);

        self.process_arrivals(now, data, observer)?;
        self.process_departures(now)?;

        let moving = self.participants.count(ParticipantStatus::InTransit);
        observer.on_step_end(now, moving);
        data.advance_clock(self.parameters.time_step)?;
        Ok(moving)
    }

    fn process_arrivals<O: SimObserver>(
        &mut self,
        now:      Step,
        data:     &mut SimulationData,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(name) = self.current_map.as_ref() else {
            return Err(SimError::NoCurrentMap);
        };
        let graph = &self.maps[name].graph;

        for id in self.participants.arriving(now) {
            let (from, to) = self.participants.arrive(id, now);
            let state = self.participants.state(id);
            let hop = Hop { participant: id, from, to, timestamp: data.time() };
            data.record_hop(&state.name, hop);
            if state.traced {
                info!(
                    participant = %state.name,
                    from = graph.key(from).unwrap_or("?"),
                    to = graph.key(to).unwrap_or("?"),
                    t = hop.timestamp,
                    "hop"
                );
            }
            observer.on_hop(&state.name, &hop, graph);
        }
        Ok(())
    }

    fn process_departures(&mut self, now: Step) -> SimResult<()> {
        let Some(name) = self.current_map.as_ref() else {
            return Err(SimError::NoCurrentMap);
        };
        let graph = &self.maps[name].graph;

        for id in self.participants.departing() {
            let state = self.participants.state(id);
            let route = match self.router.route(graph, state.position, state.destination, &self.remaining_budget) {
                Ok(route) => route,
                Err(GraphError::NoRoute { .. }) => {
                    debug!(participant = %state.name, step = now.0, "no route, stranded");
                    self.participants.mark_stranded(id);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let Some(edge) = route.first_edge() else {
                // Already at the destination.
                self.participants.arrive(id, now);
                continue;
            };
            let next = graph.edge_to[edge.index()];
            let steps = graph.edge_pdf[edge.index()].sample_steps(&mut self.rngs[id.index()]);
            if let Some(budget) = self.remaining_budget.get_mut(next.index()) {
                *budget = budget.saturating_sub(1);
            }
            self.participants.begin_hop(id, next, now, steps);
        }
        Ok(())
    }
}
