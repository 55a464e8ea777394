//! `NativeEngine` — the `hs-sim` world behind the engine trait.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use hs_graph::DijkstraRouter;
use hs_sim::{
    HopCsvObserver, NoopObserver, RunSummary, SimulationData, SimulationSettings, SimulationWorld,
};

use crate::{EngineError, EngineResult, SimulationEngine};

/// State produced by one successful `initialize`.
struct NativeRun {
    world:         SimulationWorld<DijkstraRouter>,
    data:          SimulationData,
    summary:       RunSummary,
    settings_path: PathBuf,
}

/// Loads the settings file, builds a [`SimulationWorld`], and runs it to
/// completion during `initialize`.  Queries read the finished run.
pub struct NativeEngine {
    name:     String,
    settings: SimulationSettings,
    run:      Option<NativeRun>,
}

impl NativeEngine {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Summary of the last completed run.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.run.as_ref().map(|r| &r.summary)
    }

    pub fn settings_path(&self) -> Option<&Path> {
        self.run.as_ref().map(|r| r.settings_path.as_path())
    }

    /// The finished world, e.g. to inspect participant states.
    pub fn world(&self) -> Option<&SimulationWorld<DijkstraRouter>> {
        self.run.as_ref().map(|r| &r.world)
    }

    pub fn data(&self) -> Option<&SimulationData> {
        self.run.as_ref().map(|r| &r.data)
    }

    fn execute(
        world:    &mut SimulationWorld<DijkstraRouter>,
        data:     &mut SimulationData,
        csv_path: Option<&Path>,
    ) -> EngineResult<RunSummary> {
        let Some(csv_path) = csv_path else {
            return world.run_simulation(data, &mut NoopObserver).map_err(EngineError::config);
        };

        let file = File::create(csv_path).map_err(EngineError::config)?;
        let mut observer = HopCsvObserver::new(BufWriter::new(file)).map_err(EngineError::config)?;
        let summary = world.run_simulation(data, &mut observer).map_err(EngineError::config)?;
        if let Some(e) = observer.take_error() {
            return Err(EngineError::config(e));
        }
        observer.into_inner().map_err(EngineError::config)?;
        debug!(path = %csv_path.display(), "hop CSV written");
        Ok(summary)
    }
}

impl SimulationEngine for NativeEngine {
    type Settings = SimulationSettings;

    fn construct(name: &str) -> EngineResult<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::Init("engine name must not be empty".into()));
        }
        Ok(Self {
            name:     name.to_owned(),
            settings: SimulationSettings::default(),
            run:      None,
        })
    }

    fn initialize(&mut self, settings_path: &Path) -> EngineResult<()> {
        self.run = None;
        let t0 = Instant::now();

        let settings = SimulationSettings::load(settings_path).map_err(EngineError::config)?;
        let base_dir = settings_path.parent().unwrap_or_else(|| Path::new("."));

        let mut world = SimulationWorld::from_settings(&settings, base_dir, DijkstraRouter)
            .map_err(EngineError::config)?;
        let mut data = SimulationData::new();
        let csv_path = settings.output.hops_csv.as_ref().map(|p| base_dir.join(p));
        let summary = Self::execute(&mut world, &mut data, csv_path.as_deref())?;

        info!(
            engine = %self.name,
            participants = world.participants().len(),
            hops = summary.hops,
            steps = summary.steps,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "engine initialized"
        );

        self.settings = settings;
        self.run = Some(NativeRun {
            world,
            data,
            summary,
            settings_path: settings_path.to_path_buf(),
        });
        Ok(())
    }

    fn settings(&self) -> SimulationSettings {
        self.settings.clone()
    }

    fn hop_count(&self, name: &str) -> EngineResult<u32> {
        let run = self.run.as_ref().ok_or(EngineError::NotInitialized)?;
        run.data
            .hop_count(name)
            .ok_or_else(|| EngineError::UnknownEntity(name.to_owned()))
    }

    fn construct_settings() -> SimulationSettings {
        SimulationSettings::default()
    }
}
