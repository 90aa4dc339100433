//! # Maze Test
//!
//! This binary runs a full mission against a maze file using the in-process simulated mouse, so
//! the autonomy can be developed and checked without the mms simulator.
//!
//! The maze file uses the usual ASCII format, for example a 2x2 maze:
//!
//! ```text
//! +---+---+
//! |       |
//! +   +---+
//! |       |
//! +---+---+
//! ```

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::PathBuf;

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{info, warn};
use structopt::StructOpt;

use mouse_lib::{
    auto::{
        auto_mgr::{AutoMgrParams, ReturnMethod},
        explore::ExploreMode,
        loc::Pose,
        AutoMgr,
    },
    sim::{MazeLayout, SimMouse},
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "maze_test", about = "Run a mouse mission against an ASCII maze file")]
struct Opt {
    /// Path to the maze file
    #[structopt(parse(from_os_str))]
    maze: PathBuf,

    /// Parameter file to use instead of params/auto_mgr.toml
    #[structopt(short, long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Exploration mode (full-coverage, goal-seeking or flood-guided)
    #[structopt(short, long)]
    mode: Option<ExploreMode>,

    /// Return to start method (astar or flood-fill)
    #[structopt(short, long)]
    return_method: Option<ReturnMethod>,

    /// Step budget applied to every phase
    #[structopt(short, long)]
    budget: Option<usize>,

    /// Log at trace level rather than debug
    #[structopt(short, long)]
    verbose: bool,

    /// Don't create a session, only log to stderr
    #[structopt(long)]
    no_session: bool,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    let session = if opt.no_session {
        None
    } else {
        Some(Session::new("maze_test", "sessions").wrap_err("Failed to create the session")?)
    };

    let level = if opt.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    logger_init(level, session.as_ref()).wrap_err("Failed to initialise logging")?;

    info!("Maze Test\n");
    if let Some(ref s) = session {
        info!("Session directory: {:?}\n", s.session_root);
    }

    // ---- LOAD PARAMETERS ----

    let mut params: AutoMgrParams = match opt.params {
        Some(ref path) => util::params::load_path(path)
            .wrap_err_with(|| format!("Could not load parameters from {:?}", path))?,
        None => util::params::load("auto_mgr.toml").unwrap_or_else(|e| {
            warn!("Could not load auto_mgr.toml ({}), using default parameters", e);
            AutoMgrParams::default()
        }),
    };

    if let Some(mode) = opt.mode {
        params.explore.mode = mode;
    }
    if let Some(method) = opt.return_method {
        params.return_to_start.method = method;
    }
    if let Some(budget) = opt.budget {
        params.explore.step_budget = budget;
        params.return_to_start.step_budget = budget;
        params.exec_optimal.step_budget = budget;
    }

    info!("Parameters: {:?}", params);

    // ---- LOAD MAZE ----

    let layout = MazeLayout::load(&opt.maze)
        .wrap_err_with(|| format!("Could not load the maze {:?}", opt.maze))?;

    info!(
        "Loaded {}x{} maze from {:?}:\n{}",
        layout.size().width,
        layout.size().height,
        opt.maze,
        layout
    );

    let start = Pose::new(params.start_cell, params.start_heading);
    let mut mouse = SimMouse::with_pose(layout, start);

    // ---- MISSION ----

    let mut auto_mgr =
        AutoMgr::init(params, &mut mouse).wrap_err("Failed to initialise the AutoMgr")?;

    let result = auto_mgr.run(&mut mouse);

    info!(
        "Discovered map:\n{}",
        MazeLayout::from_walls(auto_mgr.persistant.wall_map.clone())
    );
    info!(
        "Simulated mouse made {} moves, {} left turns, {} right turns and {} sensor reads",
        mouse.num_moves(),
        mouse.num_left_turns(),
        mouse.num_right_turns(),
        mouse.num_sensor_reads()
    );

    let tm = auto_mgr.get_tm();

    if let Some(ref s) = session {
        s.save("auto_tm.json", &tm)
            .wrap_err("Failed to save the mission summary")?;
    }

    match result {
        Ok(tm) => {
            info!(
                "Mission complete: {} moves, {} turns, optimal run of {} moves",
                tm.total_moves, tm.total_turns, tm.optimal_moves
            );
            Ok(())
        }
        Err(e) => Err(eyre!("Mission aborted at {}: {}", auto_mgr.pose(), e)),
    }
}
