//! Unit tests for hs-sim.

use hs_core::NodeId;
use hs_graph::{DelayPdf, DijkstraRouter, SimulationGraph, SimulationGraphBuilder};

use crate::{ParticipantSettings, ParticipantSpec, SimulationParameters, SimulationWorld};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params(max_steps: u64) -> SimulationParameters {
    SimulationParameters { time_step: 1.0, max_steps, stop_when_idle: true }
}

/// Directed line a → b → c → d, every node with `budget`.
fn line_graph(budget: u32) -> SimulationGraph {
    let mut b = SimulationGraphBuilder::new();
    let ids: Vec<NodeId> = ["a", "b", "c", "d"]
        .iter()
        .map(|k| b.add_node(*k, budget).unwrap())
        .collect();
    for w in ids.windows(2) {
        let key = format!("{}{}", w[0].0, w[1].0);
        b.add_edge(key, w[0], w[1], 1.0, DelayPdf::default()).unwrap();
    }
    b.build()
}

fn spec(name: &str, start: &str, destination: &str) -> ParticipantSpec {
    ParticipantSpec {
        name:        name.into(),
        start:       start.into(),
        destination: destination.into(),
    }
}

fn world_with(graph: SimulationGraph, max_steps: u64) -> SimulationWorld {
    let mut world = SimulationWorld::new(params(max_steps), 42, DijkstraRouter);
    world.insert_map("line", graph);
    world.set_current_map("line").unwrap();
    world
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod settings_tests {
    use crate::{SimError, SimulationSettings};

    #[test]
    fn defaults_fill_missing_fields() {
        let s = SimulationSettings::from_json_str(r#"{ "maps": { "m": "m.json" } }"#).unwrap();
        assert_eq!(s.seed, 0);
        assert_eq!(s.parameters.time_step, 1.0);
        assert_eq!(s.parameters.max_steps, 1_000);
        assert!(s.parameters.stop_when_idle);
        assert!(s.participants.explicit.is_empty());
        assert_eq!(s.current_map_name(), Some("m"));
        assert!(s.output.hops_csv.is_none());
    }

    #[test]
    fn current_map_defaults_to_first_name() {
        let s = SimulationSettings::from_json_str(
            r#"{ "maps": { "zeta": "z.json", "alpha": "a.json" } }"#,
        )
        .unwrap();
        assert_eq!(s.current_map_name(), Some("alpha"));
    }

    #[test]
    fn no_maps_is_config_error() {
        let err = SimulationSettings::from_json_str("{}").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn unknown_current_map_rejected() {
        let err = SimulationSettings::from_json_str(
            r#"{ "maps": { "m": "m.json" }, "current_map": "other" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::UnknownMap(name) if name == "other"));
    }

    #[test]
    fn non_positive_time_step_rejected() {
        let err = SimulationSettings::from_json_str(
            r#"{ "maps": { "m": "m.json" }, "parameters": { "time_step": 0.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn unknown_field_is_json_error() {
        let err = SimulationSettings::from_json_str(r#"{ "maps": { "m": "m.json" }, "sed": 1 }"#)
            .unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimulationSettings::load(std::path::Path::new("/no/such/settings.json")).unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }
}

// ── Participants ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod participant_tests {
    use hs_core::{NodeId, Step};

    use crate::{ParticipantStatus, ParticipantStore, SimError};

    #[test]
    fn duplicate_name_rejected() {
        let mut store = ParticipantStore::new();
        store.add("p", NodeId(0), NodeId(1)).unwrap();
        let err = store.add("p", NodeId(1), NodeId(0)).unwrap_err();
        assert!(matches!(err, SimError::DuplicateParticipant(n) if n == "p"));
    }

    #[test]
    fn start_at_destination_is_arrived() {
        let mut store = ParticipantStore::new();
        let id = store.add("p", NodeId(3), NodeId(3)).unwrap();
        assert_eq!(store.state(id).status, ParticipantStatus::Arrived);
        assert!(store.departing().is_empty());
    }

    #[test]
    fn hop_lifecycle() {
        let mut store = ParticipantStore::new();
        let id = store.add("p", NodeId(0), NodeId(2)).unwrap();

        store.begin_hop(id, NodeId(1), Step(4), 0);
        assert!(store.state(id).in_transit());
        assert_eq!(store.state(id).arrival_step, Step(5), "hops take at least one step");
        assert!(store.arriving(Step(4)).is_empty());
        assert_eq!(store.arriving(Step(5)), vec![id]);

        let (from, to) = store.arrive(id, Step(5));
        assert_eq!((from, to), (NodeId(0), NodeId(1)));
        assert_eq!(store.state(id).status, ParticipantStatus::Active);

        store.begin_hop(id, NodeId(2), Step(5), 1);
        store.arrive(id, Step(6));
        assert_eq!(store.state(id).status, ParticipantStatus::Arrived);
        assert!(!store.any_live());
    }

    #[test]
    fn trace_unknown_participant_errors() {
        let mut store = ParticipantStore::new();
        let err = store.set_traced("ghost", true).unwrap_err();
        assert!(matches!(err, SimError::UnknownParticipant(_)));
    }
}

// ── SimulationData ────────────────────────────────────────────────────────────

#[cfg(test)]
mod data_tests {
    use hs_core::{NodeId, ParticipantId};

    use crate::{Hop, SimulationData};

    fn hop(from: u32, to: u32) -> Hop {
        Hop { participant: ParticipantId(0), from: NodeId(from), to: NodeId(to), timestamp: 0.0 }
    }

    #[test]
    fn unknown_name_has_no_count() {
        let data = SimulationData::new();
        assert_eq!(data.hop_count("nobody"), None);
    }

    #[test]
    fn registered_name_counts_zero() {
        let mut data = SimulationData::new();
        data.register("idle");
        assert_eq!(data.hop_count("idle"), Some(0));
    }

    #[test]
    fn counts_and_coverage() {
        let mut data = SimulationData::new();
        data.record_hop("x", hop(0, 1));
        data.record_hop("x", hop(1, 2));
        data.record_hop("y", hop(2, 1));
        assert_eq!(data.hop_count("x"), Some(2));
        assert_eq!(data.hop_count("y"), Some(1));
        assert_eq!(data.hops(), 3);
        assert!((data.coverage(6) - 0.5).abs() < 1e-6);
        assert_eq!(data.coverage(0), 0.0);
        assert_eq!(data.participants(), vec!["x", "y"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut data = SimulationData::new();
        data.record_hop("x", hop(0, 1));
        data.advance_clock(2.0).unwrap();
        data.clear();
        assert_eq!(data.hops(), 0);
        assert_eq!(data.hop_count("x"), None);
        assert_eq!(data.time(), 0.0);
    }
}

// ── World: maps and placement ─────────────────────────────────────────────────

#[cfg(test)]
mod world_setup_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn unknown_map_rejected() {
        let mut world = world_with(line_graph(10), 10);
        let err = world.set_current_map("nope").unwrap_err();
        assert!(matches!(err, SimError::UnknownMap(_)));
    }

    #[test]
    fn explicit_participant_with_unknown_node() {
        let mut world = world_with(line_graph(10), 10);
        let settings = ParticipantSettings {
            explicit: vec![spec("p", "a", "zz")],
            ..Default::default()
        };
        let err = world.initialize_participants(&settings).unwrap_err();
        assert!(matches!(err, SimError::UnknownNode { key, .. } if key == "zz"));
    }

    #[test]
    fn randomize_names_and_counts() {
        let mut world = world_with(line_graph(10), 10);
        world.randomize_participants(3).unwrap();
        let store = world.participants();
        assert_eq!(store.len(), 3);
        assert!(store.get("participant-0").is_some());
        assert!(store.get("participant-2").is_some());
    }

    #[test]
    fn randomize_on_empty_map_errors() {
        let mut world = world_with(SimulationGraph::empty(), 10);
        assert!(matches!(world.randomize_participants(1), Err(SimError::Config(_))));
    }

    #[test]
    fn switching_maps_drops_participants() {
        let mut world = world_with(line_graph(10), 10);
        world.randomize_participants(2).unwrap();
        world.insert_map("other", line_graph(3));
        world.set_current_map("other").unwrap();
        assert!(world.participants().is_empty());
        assert_eq!(world.remaining_budget(), &[3, 3, 3, 3]);
        assert_eq!(world.current_map_name(), Some("other"));
    }

    #[test]
    fn trace_and_untrace() {
        let mut world = world_with(line_graph(10), 10);
        let settings = ParticipantSettings {
            explicit: vec![spec("p", "a", "d")],
            trace: vec!["p".into()],
            ..Default::default()
        };
        world.initialize_participants(&settings).unwrap();
        let id = world.participants().get("p").unwrap();
        assert!(world.participants().state(id).traced);
        world.untrace_participant("p").unwrap();
        assert!(!world.participants().state(id).traced);
        assert!(world.trace_participant("q").is_err());
    }
}

// ── World: step loop ──────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use hs_core::Step;
    use hs_graph::SimulationGraph;

    use super::*;
    use crate::{Hop, NoopObserver, ParticipantStatus, SimObserver, SimulationData};

    fn line_world(max_steps: u64, budget: u32) -> SimulationWorld {
        let mut world = world_with(line_graph(budget), max_steps);
        let settings = ParticipantSettings {
            explicit: vec![spec("nodeX", "a", "d")],
            ..Default::default()
        };
        world.initialize_participants(&settings).unwrap();
        world
    }

    #[test]
    fn line_walk_records_three_hops() {
        let mut world = line_world(100, 10);
        let mut data = SimulationData::new();
        let summary = world.run_simulation(&mut data, &mut NoopObserver).unwrap();

        assert_eq!(data.hop_count("nodeX"), Some(3));
        assert_eq!(summary.hops, 3);
        assert_eq!(summary.arrived, 1);
        assert_eq!(summary.steps, 4, "depart at 0, arrive at 1, 2, 3; stop before 4");
        assert!((data.coverage(4) - 1.0).abs() < 1e-6);

        let hops = data.hops_for("nodeX").unwrap();
        let timestamps: Vec<f64> = hops.iter().map(|h| h.timestamp).collect();
        assert_eq!(timestamps, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn budgets_are_consumed() {
        let mut world = line_world(100, 10);
        let mut data = SimulationData::new();
        world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        // a (source) is never entered.
        assert_eq!(world.remaining_budget(), &[10, 9, 9, 9]);
    }

    #[test]
    fn exhausted_node_strands_participant() {
        let mut world = line_world(100, 10);
        world.insert_map("line", line_graph(0));
        world.set_current_map("line").unwrap();
        world
            .initialize_participants(&ParticipantSettings {
                explicit: vec![spec("nodeX", "a", "d")],
                ..Default::default()
            })
            .unwrap();
        let mut data = SimulationData::new();
        let summary = world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        assert_eq!(summary.stranded, 1);
        assert_eq!(data.hop_count("nodeX"), Some(0));
    }

    #[test]
    fn max_steps_cuts_run_short() {
        let mut world = line_world(2, 10);
        let mut data = SimulationData::new();
        let summary = world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        assert_eq!(summary.steps, 2);
        assert_eq!(data.hop_count("nodeX"), Some(1));
        assert_eq!(summary.unfinished, 1);
    }

    #[test]
    fn pdf_delays_arrival() {
        let mut b = SimulationGraphBuilder::new();
        let a = b.add_node("a", 5).unwrap();
        let z = b.add_node("z", 5).unwrap();
        b.add_edge("az", a, z, 1.0, DelayPdf::new(vec![0.0, 0.0, 0.0, 1.0])).unwrap();
        let mut world = world_with(b.build(), 100);
        world
            .initialize_participants(&ParticipantSettings {
                explicit: vec![spec("slow", "a", "z")],
                ..Default::default()
            })
            .unwrap();
        let mut data = SimulationData::new();
        world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        assert_eq!(data.hops_for("slow").unwrap()[0].timestamp, 4.0);
    }

    #[test]
    fn idle_world_stops_immediately() {
        let mut world = world_with(line_graph(1), 50);
        let mut data = SimulationData::new();
        let summary = world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.hops, 0);
    }

    #[test]
    fn keep_running_when_idle_if_asked() {
        let mut world = SimulationWorld::new(
            SimulationParameters { time_step: 0.5, max_steps: 6, stop_when_idle: false },
            1,
            DijkstraRouter,
        );
        world.insert_map("line", line_graph(1));
        world.set_current_map("line").unwrap();
        let mut data = SimulationData::new();
        let summary = world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        assert_eq!(summary.steps, 6);
        assert!((data.time() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn run_without_map_errors() {
        let mut world: SimulationWorld = SimulationWorld::new(params(5), 0, DijkstraRouter);
        let mut data = SimulationData::new();
        assert!(world.run_simulation(&mut data, &mut NoopObserver).is_err());
    }

    #[test]
    fn same_seed_same_results() {
        let run = || {
            let mut world = SimulationWorld::new(params(200), 9, DijkstraRouter);
            let mut b = SimulationGraphBuilder::new();
            let ids: Vec<_> = (0..6).map(|i| b.add_node(format!("n{i}"), 50).unwrap()).collect();
            for i in 0..6 {
                let j = (i + 1) % 6;
                b.add_edge(format!("f{i}"), ids[i], ids[j], 1.0, DelayPdf::new(vec![1.0, 1.0, 1.0]))
                    .unwrap();
                b.add_edge(format!("r{i}"), ids[j], ids[i], 2.0, DelayPdf::default()).unwrap();
            }
            world.insert_map("ring", b.build());
            world.set_current_map("ring").unwrap();
            world.randomize_participants(8).unwrap();
            let mut data = SimulationData::new();
            world.run_simulation(&mut data, &mut NoopObserver).unwrap();
            (0..8)
                .map(|i| {
                    let name = format!("participant-{i}");
                    let hops: Vec<(u32, u32, f64)> = data
                        .hops_for(&name)
                        .unwrap()
                        .iter()
                        .map(|h| (h.from.0, h.to.0, h.timestamp))
                        .collect();
                    hops
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    /// Observer that records every callback.
    #[derive(Default)]
    struct Recorder {
        starts: usize,
        hops:   Vec<String>,
        ended:  Option<Step>,
    }

    impl SimObserver for Recorder {
        fn on_step_start(&mut self, _step: Step) {
            self.starts += 1;
        }
        fn on_hop(&mut self, participant: &str, hop: &Hop, graph: &SimulationGraph) {
            let to = graph.key(hop.to).unwrap_or("?");
            self.hops.push(format!("{participant}->{to}"));
        }
        fn on_sim_end(&mut self, final_step: Step) {
            self.ended = Some(final_step);
        }
    }

    #[test]
    fn observer_sees_every_hop() {
        let mut world = line_world(100, 10);
        let mut data = SimulationData::new();
        let mut obs = Recorder::default();
        world.run_simulation(&mut data, &mut obs).unwrap();
        assert_eq!(obs.starts, 4);
        assert_eq!(obs.hops, vec!["nodeX->b", "nodeX->c", "nodeX->d"]);
        assert_eq!(obs.ended, Some(Step(4)));
        let id = world.participants().get("nodeX").unwrap();
        assert_eq!(world.participants().state(id).status, ParticipantStatus::Arrived);
    }
}

// ── CSV output ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod output_tests {
    use super::*;
    use crate::{HopCsvObserver, SimulationData};

    #[test]
    fn csv_rows_per_hop() {
        let mut world = world_with(line_graph(10), 100);
        world
            .initialize_participants(&ParticipantSettings {
                explicit: vec![spec("nodeX", "b", "d")],
                ..Default::default()
            })
            .unwrap();
        let mut data = SimulationData::new();
        let mut obs = HopCsvObserver::new(Vec::new()).unwrap();
        world.run_simulation(&mut data, &mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let bytes = obs.into_inner().unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["participant", "from", "to", "timestamp"]);
        let rows: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        assert_eq!(rows, vec![
            vec!["nodeX", "b", "c", "1"],
            vec!["nodeX", "c", "d", "2"],
        ]);
    }
}

// ── World from settings files ─────────────────────────────────────────────────

#[cfg(test)]
mod from_settings_tests {
    use std::fs;

    use hs_graph::DijkstraRouter;

    use crate::{NoopObserver, SimulationData, SimulationSettings, SimulationWorld};

    #[test]
    fn loads_maps_relative_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("maps")).unwrap();
        fs::write(
            dir.path().join("maps/tri.json"),
            r#"{
                "nodes": { "a": { "budget": 9 }, "b": { "budget": 9 }, "c": { "budget": 9 } },
                "edges": {
                    "ab": { "from": "a", "to": "b", "distance": 1 },
                    "bc": { "from": "b", "to": "c", "distance": 1 },
                    "ac": { "from": "a", "to": "c", "distance": 5 }
                }
            }"#,
        )
        .unwrap();
        let settings = SimulationSettings::from_json_str(
            r#"{
                "seed": 3,
                "maps": { "tri": "maps/tri.json" },
                "participants": {
                    "explicit": [ { "name": "walker", "start": "a", "destination": "c" } ],
                    "random_count": 2,
                    "trace": ["walker"]
                }
            }"#,
        )
        .unwrap();

        let mut world = SimulationWorld::from_settings(&settings, dir.path(), DijkstraRouter).unwrap();
        assert_eq!(world.current_map_name(), Some("tri"));
        assert_eq!(world.participants().len(), 3);
        assert!(world.participants().get("participant-1").is_some());

        let mut data = SimulationData::new();
        world.run_simulation(&mut data, &mut NoopObserver).unwrap();
        assert_eq!(data.hop_count("walker"), Some(2));
    }
}
