pub mod clock;
pub mod geometry;
pub mod replay;
pub mod trial;

pub use clock::SampleClock;
pub use geometry::{GeneratedPath, TaskGeometry, generate_path};
pub use trial::{
    ExcursionEvent, FailReason, SampleOutcome, TrajectorySample, Trial, TrialRecord, TrialState,
};

// Stateless checkers, for callers that drive their own sampling loop.
pub use steering_lasso::{check_lasso_collision, check_lasso_shortcut};
pub use steering_menu::check_menu_excursion;
pub use steering_tunnel::check_boundary;
