//! Main mouse executable entry point.
//!
//! # Architecture
//!
//! The executable is launched by the mms micromouse simulator, which talks to it over stdin and
//! stdout. Execution consists of:
//!
//!     - Session and logging initialisation (logs go to stderr and the session log file)
//!     - Parameter loading
//!     - Mission execution with the AutoMgr until it completes or aborts
//!     - Saving the mission summary into the session

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{error, info, warn};

// Internal
use comms_if::mms::MmsClient;
use mouse_lib::auto::{auto_mgr::AutoMgrParams, AutoMgr};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Parameter file of the AutoMgr, relative to the params directory.
const AUTO_MGR_PARAMS_PATH: &str = "auto_mgr.toml";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("mouse_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, Some(&session)).wrap_err("Failed to initialise logging")?;

    info!("Micromouse Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: AutoMgrParams = match util::params::load(AUTO_MGR_PARAMS_PATH) {
        Ok(p) => p,
        Err(e) => {
            warn!(
                "Could not load {} ({}), using default parameters",
                AUTO_MGR_PARAMS_PATH, e
            );
            AutoMgrParams::default()
        }
    };

    info!("Parameters loaded: {:?}", params);

    // ---- MISSION ----

    let mut mouse = MmsClient::stdio();

    let mut auto_mgr =
        AutoMgr::init(params, &mut mouse).wrap_err("Failed to initialise the AutoMgr")?;

    let result = auto_mgr.run(&mut mouse);

    // Always save the summary, it holds the abort reason if there was one
    session
        .save("auto_tm.json", &auto_mgr.get_tm())
        .wrap_err("Failed to save the mission summary")?;

    match result {
        Ok(tm) => {
            info!(
                "Mission complete: {} moves, {} turns, optimal run of {} moves",
                tm.total_moves, tm.total_turns, tm.optimal_moves
            );
            Ok(())
        }
        Err(e) => {
            error!("Mission aborted at {}", auto_mgr.pose());
            Err(e).wrap_err("Mission aborted")
        }
    }
}
